//! Loading and writing environment manifests

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::entry::DependencyEntry;
use crate::error::{Error, Result};
use crate::io;

/// Top-level key holding the dependency list.
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// Appended to the input file stem to name the output file.
const UPDATED_SUFFIX: &str = "-updated.yml";

/// A parsed environment manifest.
///
/// Keys other than `dependencies` are carried through untouched and keep
/// their original order when written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Mapping,
    dependencies: Vec<DependencyEntry>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::parse(&content, path)
    }

    /// Parse manifest text. `origin` is used for error messages only.
    pub fn parse(source: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source).map_err(|e| Error::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let Value::Mapping(document) = value else {
            return Err(Error::invalid(origin, "expected a mapping at the top level"));
        };

        let dependencies = match document.get(DEPENDENCIES_KEY) {
            Some(Value::Sequence(items)) => items
                .iter()
                .cloned()
                .map(DependencyEntry::classify)
                .collect::<Vec<_>>(),
            Some(_) => {
                return Err(Error::invalid(
                    origin,
                    format!("'{}' must be a list", DEPENDENCIES_KEY),
                ));
            }
            None => {
                return Err(Error::invalid(
                    origin,
                    format!("missing '{}' key", DEPENDENCIES_KEY),
                ));
            }
        };

        debug!(path = %origin.display(), entries = dependencies.len(), "Loaded manifest");
        Ok(Self {
            document,
            dependencies,
        })
    }

    pub fn dependencies(&self) -> &[DependencyEntry] {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut [DependencyEntry] {
        &mut self.dependencies
    }

    /// Other top-level value, e.g. `name` or `channels`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Render the manifest as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        let mut document = self.document.clone();
        let items = self.dependencies.iter().map(DependencyEntry::to_value).collect();
        // Replacing an existing key keeps its position
        document.insert(Value::String(DEPENDENCIES_KEY.into()), Value::Sequence(items));

        serde_yaml::to_string(&Value::Mapping(document)).map_err(|e| Error::Serialize {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Write the manifest to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml().map_err(|e| match e {
            Error::Serialize { message, .. } => Error::Serialize {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        io::write_atomic(path, content.as_bytes())
    }
}

/// Where the pinned copy of `input` is written.
///
/// `env/environment.yml` becomes `env/environment-updated.yml`; an input
/// without an extension just gains the suffix.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, UPDATED_SUFFIX))
}
