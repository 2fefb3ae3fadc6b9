//! Dependency entries of an environment manifest

use serde_yaml::Value;

/// Characters that mark the start of a version constraint.
const CONSTRAINT_MARKERS: [char; 6] = ['=', '<', '>', '!', '~', '*'];

/// One item of the manifest's `dependencies` list.
///
/// The shape is decided once when the manifest is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyEntry {
    /// A bare package name such as `numpy`.
    Unpinned { name: String },
    /// A name carrying a version constraint, e.g. `pandas=1.5.0` or
    /// `python>=3.10`. `raw` is the entry exactly as written.
    Pinned { name: String, raw: String },
    /// Anything that is not a plain string, such as a `pip:` sub-list.
    Opaque { value: Value },
}

impl DependencyEntry {
    /// Classify a raw YAML list item.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::String(text) => Self::classify_text(text),
            value => Self::Opaque { value },
        }
    }

    fn classify_text(text: String) -> Self {
        // Padded or empty strings are not package specs we can rewrite safely
        if text.is_empty() || text.trim() != text {
            return Self::Opaque {
                value: Value::String(text),
            };
        }

        match text.find(|c: char| CONSTRAINT_MARKERS.contains(&c) || c.is_whitespace()) {
            None => Self::Unpinned { name: text },
            Some(idx) => Self::Pinned {
                name: text[..idx].to_string(),
                raw: text,
            },
        }
    }

    /// An exact `name=version` pin.
    pub fn pinned(name: &str, version: &str) -> Self {
        Self::Pinned {
            name: name.to_string(),
            raw: format!("{}={}", name, version),
        }
    }

    /// Package name, for entries that name a single package.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unpinned { name } | Self::Pinned { name, .. } => Some(name),
            Self::Opaque { .. } => None,
        }
    }

    /// Name as the package index knows it, without a `channel::` qualifier.
    pub fn package(&self) -> Option<&str> {
        self.name().map(package_name)
    }

    pub fn is_unpinned(&self) -> bool {
        matches!(self, Self::Unpinned { .. })
    }

    /// Short human label used in reports.
    ///
    /// Sub-lists are named by their key (`pip`).
    pub fn label(&self) -> String {
        match self {
            Self::Unpinned { name } => name.clone(),
            Self::Pinned { raw, .. } => raw.clone(),
            Self::Opaque { value } => match value {
                Value::Mapping(map) => map
                    .keys()
                    .map(|k| match k {
                        Value::String(s) => s.clone(),
                        other => scalar_text(other),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                other => scalar_text(other),
            },
        }
    }

    /// The entry as it is written back to the manifest.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Unpinned { name } => Value::String(name.clone()),
            Self::Pinned { raw, .. } => Value::String(raw.clone()),
            Self::Opaque { value } => value.clone(),
        }
    }
}

/// Strip a `channel::` qualifier: `conda-forge::xarray` is `xarray`.
pub fn package_name(name: &str) -> &str {
    name.rsplit_once("::").map_or(name, |(_, package)| package)
}

fn scalar_text(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
