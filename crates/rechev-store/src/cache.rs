//! Read-through cache for raw datastore responses
//!
//! One JSON file per key. Each file stores the payload together with the
//! time it was written; freshness is judged from that timestamp, so touching
//! a file on disk does not extend its life.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rechev_types::{CacheError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Responses are considered fresh for this many days
pub const CACHE_TTL_DAYS: i64 = 7;

/// Key kinds this cache writes; only files named `<kind>_*.json` are managed
pub const ENTRY_KINDS: [&str; 5] = ["veh", "personal", "price", "details", "disability"];

/// Source of "now" for expiry checks
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Identifies one cached query: a kind prefix plus its key fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    kind: String,
    parts: Vec<String>,
}

impl CacheKey {
    pub fn new<I, S>(kind: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.to_string(),
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Raw key text, e.g. `price_5_9`
    pub fn raw(&self) -> String {
        let mut raw = self.kind.clone();
        for part in &self.parts {
            raw.push('_');
            raw.push_str(part);
        }
        raw
    }

    /// File name for this key.
    ///
    /// Characters outside `[A-Za-z0-9-]` in the key fields become `-`; when
    /// that happens a short hash of the raw key is appended so two plates
    /// that sanitize the same way still map to different files.
    pub fn file_name(&self) -> String {
        let mut name = self.kind.clone();
        let mut replaced = false;
        for part in &self.parts {
            name.push('_');
            for c in part.chars() {
                if c.is_ascii_alphanumeric() || c == '-' {
                    name.push(c);
                } else {
                    name.push('-');
                    replaced = true;
                }
            }
        }
        if replaced {
            let digest = Sha256::digest(self.raw().as_bytes());
            let hex = format!("{:x}", digest);
            name.push('_');
            name.push_str(&hex[..12]);
        }
        name.push_str(".json");
        name
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// On-disk envelope for one cached response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub stored_at: DateTime<Utc>,
    pub payload: Value,
}

/// Cache for raw JSON responses, keyed by query
#[derive(Clone)]
pub struct ResponseCache {
    cache_dir: PathBuf,
    ttl: Duration,
    clock: Clock,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("cache_dir", &self.cache_dir)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ResponseCache {
    /// Open a cache directory with the standard seven-day TTL
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        Self::with_ttl(cache_dir, Duration::days(CACHE_TTL_DAYS))
    }

    pub fn with_ttl(cache_dir: PathBuf, ttl: Duration) -> Result<Self> {
        fs::create_dir_all(&cache_dir)
            .map_err(|e| CacheError::IoError(format!("{}: {}", cache_dir.display(), e)))?;
        Ok(Self {
            cache_dir,
            ttl,
            clock: Arc::new(Utc::now),
        })
    }

    /// Replace the clock used for expiry checks
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.now().signed_duration_since(entry.stored_at) < self.ttl
    }

    fn read_entry(path: &Path) -> Result<CacheEntry> {
        let content = fs::read_to_string(path)?;
        let entry: CacheEntry = serde_json::from_str(&content)
            .map_err(|e| CacheError::Corrupted(format!("{}: {}", path.display(), e)))?;
        Ok(entry)
    }

    /// Fresh payload stored under `key`, if any
    pub fn get(&self, key: &CacheKey) -> Result<Option<Value>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let entry = Self::read_entry(&path)?;
        if self.is_fresh(&entry) {
            Ok(Some(entry.payload))
        } else {
            debug!("cache entry {} expired (stored {})", key, entry.stored_at);
            Ok(None)
        }
    }

    /// Store a payload under `key`, stamped with the current time
    pub fn put(&self, key: &CacheKey, payload: &Value) -> Result<()> {
        let entry = CacheEntry {
            key: key.raw(),
            stored_at: self.now(),
            payload: payload.clone(),
        };
        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(self.entry_path(key), content)?;
        Ok(())
    }

    /// Return the fresh payload for `key`, or run `fetch` and store its result.
    ///
    /// A failed fetch propagates and leaves the cache untouched.
    pub fn get_or_fetch<F>(&self, key: &CacheKey, fetch: F) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        if let Some(payload) = self.get(key)? {
            debug!("cache hit: {}", key);
            return Ok(payload);
        }

        debug!("cache miss: {}", key);
        let payload = fetch()?;
        self.put(key, &payload)?;
        Ok(payload)
    }

    fn is_entry_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name.ends_with(".json")
            && ENTRY_KINDS.iter().any(|kind| {
                name.strip_prefix(kind)
                    .map_or(false, |rest| rest.starts_with('_'))
            })
    }

    /// Files written by this cache; anything else in the directory is left alone
    fn entry_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.is_file() && Self::is_entry_file(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Remove every cached response
    pub fn clear(&self) -> Result<usize> {
        let mut count = 0;
        for path in self.entry_files()? {
            fs::remove_file(&path)?;
            count += 1;
        }
        Ok(count)
    }

    /// Remove expired and unreadable entries, keeping fresh ones
    pub fn purge_expired(&self) -> Result<usize> {
        let mut count = 0;
        for path in self.entry_files()? {
            let stale = match Self::read_entry(&path) {
                Ok(entry) => !self.is_fresh(&entry),
                Err(e) => {
                    warn!("removing unreadable cache entry: {}", e);
                    true
                }
            };
            if stale {
                fs::remove_file(&path)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let mut entry_count = 0;
        let mut expired_count = 0;
        let mut total_size = 0u64;

        for path in self.entry_files()? {
            entry_count += 1;
            if let Ok(metadata) = fs::metadata(&path) {
                total_size += metadata.len();
            }
            match Self::read_entry(&path) {
                Ok(entry) if self.is_fresh(&entry) => {}
                _ => expired_count += 1,
            }
        }

        Ok(CacheStats {
            entry_count,
            expired_count,
            total_size_bytes: total_size,
            cache_dir: self.cache_dir.clone(),
        })
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entry_count: usize,
    pub expired_count: usize,
    pub total_size_bytes: u64,
    pub cache_dir: PathBuf,
}

impl CacheStats {
    pub fn display(&self) -> String {
        let size_kb = self.total_size_bytes as f64 / 1024.0;
        format!(
            "Cache Statistics\n\
             ================\n\
             Entries:    {}\n\
             Expired:    {}\n\
             Total size: {:.2} KB\n\
             Location:   {}",
            self.entry_count,
            self.expired_count,
            size_kb,
            self.cache_dir.display()
        )
    }
}
