//! In-memory [`PackageIndex`] for exercising the updater without conda.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDate;
use envpin_resolver::{Error, PackageIndex, Result, VersionRecord};

/// Milliseconds since the epoch for midnight UTC on `date` (`YYYY-MM-DD`).
pub fn timestamp_ms(date: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("timestamp_ms: bad date {:?}: {}", date, e))
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

/// Package index answering from fixed data.
///
/// Unknown packages yield an empty record list, like conda's JSON output
/// for a package with no builds. Every lookup is recorded.
///
/// ```rust,no_run
/// use envpin_test_utils::StaticIndex;
///
/// let index = StaticIndex::new()
///     .with_package("numpy", &[("1.24.0", "2022-12-18"), ("1.25.0", "2023-06-17")])
///     .with_failure("flaky", "CondaHTTPError");
/// ```
#[derive(Debug, Default)]
pub struct StaticIndex {
    packages: HashMap<String, Vec<VersionRecord>>,
    failures: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl StaticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `(version, YYYY-MM-DD)` records for a package.
    pub fn with_package(mut self, name: &str, releases: &[(&str, &str)]) -> Self {
        let records = releases
            .iter()
            .map(|(version, date)| VersionRecord::new(*version, timestamp_ms(date)))
            .collect();
        self.packages.insert(name.to_string(), records);
        self
    }

    /// Register raw records for a package.
    pub fn with_records(mut self, name: &str, records: Vec<VersionRecord>) -> Self {
        self.packages.insert(name.to_string(), records);
        self
    }

    /// Make lookups of `name` fail as if the query itself broke.
    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    /// Package names looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PackageIndex for StaticIndex {
    fn id(&self) -> &str {
        "static"
    }

    fn search(&self, package: &str) -> Result<Vec<VersionRecord>> {
        self.calls.borrow_mut().push(package.to_string());

        if let Some(message) = self.failures.get(package) {
            return Err(Error::QueryFailed {
                package: package.to_string(),
                message: message.clone(),
            });
        }
        Ok(self.packages.get(package).cloned().unwrap_or_default())
    }
}
