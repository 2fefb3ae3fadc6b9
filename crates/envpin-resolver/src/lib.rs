//! Date-bounded version lookup for envpin.
//!
//! Queries a package index for every published version of a package and
//! picks the newest one released on or before a cutoff date.

pub mod config;
pub mod error;
pub mod index;
pub mod record;
pub mod resolver;
pub mod version;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use index::{CondaIndex, PackageIndex};
pub use record::VersionRecord;
pub use resolver::{ResolvedVersion, VersionResolver, parse_cutoff, select_latest};
pub use version::compare_versions;
