//! Persistent response cache for rechev-lookup

pub mod cache;

pub use cache::{
    CacheEntry, CacheKey, CacheStats, Clock, ResponseCache, CACHE_TTL_DAYS, ENTRY_KINDS,
};
