//! envpin CLI
//!
//! Pins the bare dependencies of a conda environment manifest to the newest
//! versions published on or before a cutoff date.

mod cli;
mod error;
mod logging;
mod pin;

use clap::Parser;
use colored::Colorize;

use envpin_manifest::UpdateOptions;
use envpin_resolver::{IndexConfig, parse_cutoff};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Wrong arity exits with status 2 and usage before any work
    let cli = Cli::parse();

    logging::init(cli.verbose)?;
    tracing::debug!(?cli, "Parsed arguments");

    let cutoff = parse_cutoff(&cli.date)?;

    let config = IndexConfig::new()
        .with_executable(cli.conda)
        .with_channel(cli.channel);
    let options = UpdateOptions {
        dry_run: cli.dry_run,
        output: cli.output,
    };

    pin::run_pin(&cli.manifest, cutoff, config, options, cli.json)
}
