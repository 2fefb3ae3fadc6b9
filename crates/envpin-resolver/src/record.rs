//! Published version records as reported by the package index

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One published build of a package.
///
/// Indexes report a record per build, so the same version string can
/// appear several times with different timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    /// Publish time in milliseconds since the Unix epoch.
    ///
    /// Absent on many older conda-forge builds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            version: version.into(),
            timestamp: Some(timestamp_ms),
            build: None,
        }
    }

    /// Calendar day (UTC) the record was published, if known.
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.timestamp
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive())
    }
}

/// Extract the records for `package` from `search --json` output.
///
/// The output is a JSON object keyed by package name. A missing key means
/// the index knows no builds for the package and yields an empty list.
pub fn parse_search_output(package: &str, stdout: &str) -> Result<Vec<VersionRecord>> {
    let malformed = |message: String| Error::MalformedResponse {
        package: package.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(stdout).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(mut by_name) = value else {
        return Err(malformed("expected a JSON object keyed by package name".into()));
    };

    match by_name.remove(package) {
        Some(records) => serde_json::from_value(records).map_err(|e| malformed(e.to_string())),
        None => Ok(Vec::new()),
    }
}
