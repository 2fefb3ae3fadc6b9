//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install a stderr subscriber.
///
/// Warnings only by default, so per-package lookup failures still show;
/// `verbose` raises the level to debug and adds targets.
pub fn init(verbose: bool) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer = filter(verbose)?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })
}

fn filter(verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_new(level).map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}
