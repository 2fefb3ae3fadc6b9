//! Environment manifest handling for envpin.
//!
//! Loads a conda-style `environment.yml`, pins every bare dependency to the
//! newest version published on or before a cutoff date, and writes the
//! result next to the input as `<stem>-updated.yml`.

pub mod entry;
pub mod error;
pub mod io;
pub mod manifest;
pub mod updater;

pub use entry::DependencyEntry;
pub use error::{Error, Result};
pub use manifest::{DEPENDENCIES_KEY, Manifest, output_path_for};
pub use updater::{EntryOutcome, ManifestUpdater, UpdateOptions, UpdateOutcome, UpdateReport};
