//! Pinning unpinned dependencies of a manifest

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use envpin_resolver::{PackageIndex, VersionResolver};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::entry::{DependencyEntry, package_name};
use crate::error::{Error, Result};
use crate::manifest::{Manifest, output_path_for};

/// Knobs for a single update run.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Resolve and report, but never write the output file.
    pub dry_run: bool,
    /// Write here instead of `<stem>-updated.yml` next to the input.
    pub output: Option<PathBuf>,
}

/// What happened to one dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Pinned {
        name: String,
        version: String,
        published: NaiveDate,
    },
    AlreadyPinned {
        entry: String,
    },
    Skipped {
        entry: String,
    },
    NotFound {
        name: String,
    },
    QueryFailed {
        name: String,
        message: String,
    },
}

impl EntryOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::QueryFailed { .. })
    }
}

/// Per-entry results of an update run, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub manifest: PathBuf,
    pub cutoff: NaiveDate,
    pub entries: Vec<EntryOutcome>,
}

impl UpdateReport {
    pub fn changed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_change()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failure()).count()
    }

    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(EntryOutcome::is_change)
    }
}

/// Result of [`ManifestUpdater::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// At least one entry was pinned and the output was written.
    Written { path: PathBuf, report: UpdateReport },
    /// Dry run: at least one entry would have been pinned.
    WouldWrite { path: PathBuf, report: UpdateReport },
    /// Nothing was pinned; no file was written.
    NoChange { report: UpdateReport },
}

impl UpdateOutcome {
    pub fn report(&self) -> &UpdateReport {
        match self {
            Self::Written { report, .. }
            | Self::WouldWrite { report, .. }
            | Self::NoChange { report } => report,
        }
    }

    pub fn written_path(&self) -> Option<&Path> {
        match self {
            Self::Written { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Drives the resolver over a manifest and writes the pinned copy.
#[derive(Debug)]
pub struct ManifestUpdater<I> {
    resolver: VersionResolver<I>,
    options: UpdateOptions,
}

impl<I: PackageIndex> ManifestUpdater<I> {
    pub fn new(resolver: VersionResolver<I>) -> Self {
        Self {
            resolver,
            options: UpdateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: UpdateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn resolver(&self) -> &VersionResolver<I> {
        &self.resolver
    }

    /// Pin every bare dependency of the manifest at `manifest_path`.
    ///
    /// Lookup failures are reported per entry and never abort the run. The
    /// input file is never modified; output is written only when at least
    /// one entry was pinned.
    pub fn update(&self, manifest_path: &Path, cutoff: NaiveDate) -> Result<UpdateOutcome> {
        let path = self
            .options
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(manifest_path));
        if same_file(&path, manifest_path) {
            return Err(Error::OutputIsInput { path });
        }

        let manifest = Manifest::load(manifest_path)?;
        let (manifest, entries) = self.pin(manifest, cutoff);

        let report = UpdateReport {
            manifest: manifest_path.to_path_buf(),
            cutoff,
            entries,
        };

        if !report.has_changes() {
            info!("No unpinned packages found or no updates were made");
            return Ok(UpdateOutcome::NoChange { report });
        }

        if self.options.dry_run {
            info!(path = %path.display(), "Dry run, not writing updated manifest");
            return Ok(UpdateOutcome::WouldWrite { path, report });
        }

        manifest.save(&path)?;
        info!(path = %path.display(), pinned = report.changed(), "Updated manifest saved");
        Ok(UpdateOutcome::Written { path, report })
    }

    /// Pin the bare entries of `manifest` in place, one lookup each.
    pub fn pin(&self, mut manifest: Manifest, cutoff: NaiveDate) -> (Manifest, Vec<EntryOutcome>) {
        let outcomes = manifest
            .dependencies_mut()
            .iter_mut()
            .map(|entry| self.pin_entry(entry, cutoff))
            .collect();
        (manifest, outcomes)
    }

    fn pin_entry(&self, entry: &mut DependencyEntry, cutoff: NaiveDate) -> EntryOutcome {
        let name = match &*entry {
            DependencyEntry::Unpinned { name } => name.clone(),
            DependencyEntry::Pinned { raw, .. } => {
                debug!(entry = %raw, "Already pinned");
                return EntryOutcome::AlreadyPinned { entry: raw.clone() };
            }
            opaque @ DependencyEntry::Opaque { .. } => {
                let label = opaque.label();
                info!(entry = %label, "Skipping nested dependency list");
                return EntryOutcome::Skipped { entry: label };
            }
        };

        // A `channel::` qualifier stays in the pin but not in the lookup
        let package = package_name(&name);
        info!(package = %package, "Finding version for unpinned package");
        match self.resolver.resolve(package, cutoff) {
            Ok(resolved) => {
                info!(package = %package, version = %resolved.version, "Pinning package");
                *entry = DependencyEntry::pinned(&name, &resolved.version);
                EntryOutcome::Pinned {
                    name,
                    version: resolved.version,
                    published: resolved.published,
                }
            }
            Err(e) if e.is_not_found() => {
                warn!(package = %name, %cutoff, "No version found on or before cutoff");
                EntryOutcome::NotFound { name }
            }
            Err(e) => {
                warn!(package = %name, %cutoff, error = %e, "Version lookup failed");
                EntryOutcome::QueryFailed {
                    name,
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Whether two paths name the same file, resolving links when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
