//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use envpin_resolver::config::{DEFAULT_CHANNEL, DEFAULT_EXECUTABLE};

/// Pin unpinned conda environment dependencies to the newest version
/// published on or before a date
#[derive(Parser, Debug)]
#[command(name = "envpin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Environment manifest to pin (e.g. environment.yml)
    pub manifest: PathBuf,

    /// Cutoff date in YYYY-MM-DD form
    pub date: String,

    /// Executable used to query the package index
    #[arg(long, value_name = "PATH", default_value = DEFAULT_EXECUTABLE)]
    pub conda: PathBuf,

    /// Channel to search
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Write the pinned manifest here instead of <name>-updated.yml
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Resolve versions and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
