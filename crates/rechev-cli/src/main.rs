//! Rechev Lookup - vehicle details by license plate from data.gov.il
//!
//! Command-line front end: lookup, HTML export, cache and config management.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
