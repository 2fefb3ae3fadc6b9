//! The pin command: resolve, rewrite, and report

use std::path::Path;

use chrono::NaiveDate;
use colored::Colorize;

use envpin_manifest::{EntryOutcome, ManifestUpdater, UpdateOptions, UpdateOutcome};
use envpin_resolver::{CondaIndex, IndexConfig, VersionResolver};

use crate::error::Result;

/// Pin the unpinned dependencies of `manifest` as of `cutoff`.
///
/// Per-package lookup failures are reported but do not fail the command.
pub fn run_pin(
    manifest: &Path,
    cutoff: NaiveDate,
    config: IndexConfig,
    options: UpdateOptions,
    json: bool,
) -> Result<()> {
    if !json {
        println!(
            "{} Pinning unpinned packages in {} as of {}...",
            "=>".blue().bold(),
            manifest.display().to_string().cyan(),
            cutoff
        );
    }

    let updater =
        ManifestUpdater::new(VersionResolver::new(CondaIndex::new(config))).with_options(options);
    let outcome = updater.update(manifest, cutoff)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &UpdateOutcome) {
    let report = outcome.report();
    for entry in &report.entries {
        let marker = match entry {
            EntryOutcome::Pinned { .. } => "+".green(),
            EntryOutcome::AlreadyPinned { .. } => "=".dimmed(),
            EntryOutcome::Skipped { .. } => "-".yellow(),
            EntryOutcome::NotFound { .. } | EntryOutcome::QueryFailed { .. } => "!".red(),
        };
        println!("   {} {}", marker, describe(entry, report.cutoff));
    }
    if !report.entries.is_empty() {
        println!();
    }

    match outcome {
        UpdateOutcome::Written { path, report } => {
            println!(
                "{} Pinned {} package(s). Updated environment saved to {}",
                "OK".green().bold(),
                report.changed(),
                path.display().to_string().cyan()
            );
        }
        UpdateOutcome::WouldWrite { path, report } => {
            println!(
                "{} Would pin {} package(s) and write {}",
                "DRY RUN".yellow().bold(),
                report.changed(),
                path.display().to_string().cyan()
            );
        }
        UpdateOutcome::NoChange { .. } => {
            println!(
                "{} No unpinned packages found or no updates were made.",
                "OK".green().bold()
            );
        }
    }

    if report.failed() > 0 {
        println!(
            "{} {} package(s) left unpinned.",
            "WARN".yellow().bold(),
            report.failed()
        );
    }
}

/// One report line, without colour.
fn describe(entry: &EntryOutcome, cutoff: NaiveDate) -> String {
    match entry {
        EntryOutcome::Pinned {
            name,
            version,
            published,
        } => format!("{}={} (published {})", name, version, published),
        EntryOutcome::AlreadyPinned { entry } => format!("{} (already pinned)", entry),
        EntryOutcome::Skipped { entry } => format!("{} (skipped: nested dependency list)", entry),
        EntryOutcome::NotFound { name } => {
            format!("{} (no version published on or before {})", name, cutoff)
        }
        EntryOutcome::QueryFailed { name, message } => {
            format!("{} (lookup failed: {})", name, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        envpin_resolver::parse_cutoff(s).unwrap()
    }

    #[test]
    fn test_describe_pinned() {
        let entry = EntryOutcome::Pinned {
            name: "numpy".into(),
            version: "1.24.0".into(),
            published: day("2022-12-18"),
        };
        assert_eq!(
            describe(&entry, day("2023-06-01")),
            "numpy=1.24.0 (published 2022-12-18)"
        );
    }

    #[test]
    fn test_describe_failures_name_package() {
        let not_found = EntryOutcome::NotFound {
            name: "polars".into(),
        };
        assert_eq!(
            describe(&not_found, day("2019-01-01")),
            "polars (no version published on or before 2019-01-01)"
        );

        let failed = EntryOutcome::QueryFailed {
            name: "numpy".into(),
            message: "Command not found: conda".into(),
        };
        assert!(describe(&failed, day("2023-06-01")).contains("Command not found"));
    }

    #[test]
    fn test_describe_untouched_entries() {
        let pinned = EntryOutcome::AlreadyPinned {
            entry: "pandas=1.5.0".into(),
        };
        let skipped = EntryOutcome::Skipped {
            entry: "pip".into(),
        };
        assert_eq!(describe(&pinned, day("2023-06-01")), "pandas=1.5.0 (already pinned)");
        assert_eq!(
            describe(&skipped, day("2023-06-01")),
            "pip (skipped: nested dependency list)"
        );
    }
}
