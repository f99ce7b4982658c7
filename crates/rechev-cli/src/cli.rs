//! CLI definition using clap

use clap::{Parser, Subcommand};
use rechev_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rechev")]
#[command(version)]
#[command(about = "Vehicle lookup by license plate using data.gov.il registries")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a vehicle by license plate
    Lookup {
        /// License plate number
        plate: String,

        /// Skip the response cache (overrides config)
        #[arg(long)]
        no_cache: bool,
    },

    /// Export an HTML report for a license plate
    Export {
        /// License plate number
        plate: String,

        /// Output HTML file path (default: <plate>.html)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Do not open the report after writing it
        #[arg(long)]
        no_open: bool,

        /// Skip the response cache (overrides config)
        #[arg(long)]
        no_cache: bool,
    },

    /// Manage the response cache
    Cache {
        /// Show cache statistics
        #[arg(long)]
        stats: bool,

        /// Remove all cached responses
        #[arg(long)]
        clear: bool,

        /// Remove expired cached responses
        #[arg(long)]
        purge: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the datastore search endpoint
        #[arg(long)]
        set_base_url: Option<String>,

        /// Enable/disable caching
        #[arg(long)]
        set_cache: Option<bool>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Enable/disable the GUI welcome dialog
        #[arg(long)]
        set_welcome: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
