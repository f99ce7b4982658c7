//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::output_outcome;
use log::info;
use rechev_app::report::{export_html, open_in_viewer};
use rechev_app::{Config, LookupService};
use rechev_store::ResponseCache;
use rechev_types::{Error, OutputFormat, Result};
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match &cli.command {
        Commands::Lookup { plate, no_cache } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_lookup(&config, plate, !no_cache, output_format)
        }

        Commands::Export {
            plate,
            output,
            no_open,
            no_cache,
        } => cmd_export(&config, plate, output.clone(), !no_open, !no_cache),

        Commands::Cache { stats, clear, purge } => cmd_cache(&config, *stats, *clear, *purge),

        Commands::Config {
            show,
            set_base_url,
            set_cache,
            set_output,
            set_welcome,
            reset,
        } => cmd_config(
            config,
            *show,
            set_base_url.clone(),
            *set_cache,
            *set_output,
            *set_welcome,
            *reset,
        ),
    }
}

fn normalize_plate(plate: &str) -> Result<&str> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(Error::InvalidPlate);
    }
    Ok(plate)
}

/// Report path used when `--output` is not given
fn default_export_path(plate: &str) -> PathBuf {
    PathBuf::from(format!("{}.html", plate))
}

fn cmd_lookup(
    config: &Config,
    plate: &str,
    use_cache: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let plate = normalize_plate(plate)?;
    let service = LookupService::from_config(config, use_cache)?;
    let outcome = service.lookup(plate)?;
    output_outcome(output_format, &outcome)
}

fn cmd_export(
    config: &Config,
    plate: &str,
    output: Option<PathBuf>,
    open: bool,
    use_cache: bool,
) -> Result<()> {
    let plate = normalize_plate(plate)?;
    let service = LookupService::from_config(config, use_cache)?;
    let outcome = service.lookup(plate)?;

    let path = output.unwrap_or_else(|| default_export_path(plate));
    let written = export_html(&outcome, &path)?;
    println!("Report written to {}", written.display());

    if open && config.open_after_export {
        open_in_viewer(&written);
    }
    Ok(())
}

fn cmd_cache(config: &Config, stats: bool, clear: bool, purge: bool) -> Result<()> {
    let cache = ResponseCache::new(config.cache_dir()?)?;

    if clear {
        let removed = cache.clear()?;
        info!("cleared {} cached responses", removed);
        println!("Removed {} cached responses", removed);
    } else if purge {
        let removed = cache.purge_expired()?;
        println!("Removed {} expired cached responses", removed);
    }

    if stats || (!clear && !purge) {
        println!("{}", cache.stats()?.display());
    }
    Ok(())
}

fn cmd_config(
    mut config: Config,
    show: bool,
    set_base_url: Option<String>,
    set_cache: Option<bool>,
    set_output: Option<OutputFormat>,
    set_welcome: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut changed = false;
    if let Some(url) = set_base_url {
        config.api_base_url = url;
        changed = true;
    }
    if let Some(enabled) = set_cache {
        config.cache_enabled = enabled;
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(enabled) = set_welcome {
        config.show_welcome = enabled;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !changed {
        print!("{}", config);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plate_trims_and_rejects_blank() {
        assert_eq!(normalize_plate("  1234567 ").unwrap(), "1234567");
        assert!(matches!(normalize_plate(""), Err(Error::InvalidPlate)));
        assert!(matches!(normalize_plate(" \t "), Err(Error::InvalidPlate)));
    }

    #[test]
    fn test_default_export_path_is_plate_html() {
        assert_eq!(default_export_path("1234567"), PathBuf::from("1234567.html"));
    }
}
