//! Newest-version-before-cutoff selection

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::PackageIndex;
use crate::record::VersionRecord;
use crate::version::compare_versions;

const CUTOFF_FORMAT: &str = "%Y-%m-%d";

/// The version chosen for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub package: String,
    pub version: String,
    pub published: NaiveDate,
    /// Publish time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Looks up the newest version of a package published on or before a date.
#[derive(Debug)]
pub struct VersionResolver<I> {
    index: I,
}

impl<I: PackageIndex> VersionResolver<I> {
    pub fn new(index: I) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Resolve `package` against `cutoff`.
    ///
    /// Queries the index exactly once. Returns [`Error::NotFound`] when no
    /// record was published on or before the cutoff.
    pub fn resolve(&self, package: &str, cutoff: NaiveDate) -> Result<ResolvedVersion> {
        debug!(index = self.index.id(), package, %cutoff, "Resolving version");
        let records = self.index.search(package)?;
        trace!(package, count = records.len(), "Index returned records");

        let (published, timestamp, chosen) =
            latest_eligible(&records, cutoff).ok_or_else(|| Error::NotFound {
                package: package.to_string(),
                cutoff,
            })?;

        Ok(ResolvedVersion {
            package: package.to_string(),
            version: chosen.version.clone(),
            published,
            timestamp,
        })
    }
}

/// Pick the newest record published on or before `cutoff`.
///
/// Records are ranked by publish day, then exact timestamp, then version,
/// so the result does not depend on the order the index listed them in.
/// Records without a timestamp are never eligible.
pub fn select_latest(records: &[VersionRecord], cutoff: NaiveDate) -> Option<&VersionRecord> {
    latest_eligible(records, cutoff).map(|(_, _, record)| record)
}

fn latest_eligible(
    records: &[VersionRecord],
    cutoff: NaiveDate,
) -> Option<(NaiveDate, i64, &VersionRecord)> {
    records
        .iter()
        .filter_map(|record| {
            let (Some(timestamp), Some(day)) = (record.timestamp, record.published_on()) else {
                trace!(version = %record.version, "Skipping record without usable timestamp");
                return None;
            };
            (day <= cutoff).then_some((day, timestamp, record))
        })
        .max_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.cmp(&b.1))
                .then_with(|| compare_versions(&a.2.version, &b.2.version))
        })
}

/// Parse a cutoff given as `YYYY-MM-DD`.
pub fn parse_cutoff(input: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDate {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, CUTOFF_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ms(date: &str) -> i64 {
        let day = NaiveDate::parse_from_str(date, CUTOFF_FORMAT).unwrap();
        day.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
    }

    fn day(date: &str) -> NaiveDate {
        parse_cutoff(date).unwrap()
    }

    #[test]
    fn test_select_latest_not_exceeding_cutoff() {
        let records = vec![
            VersionRecord::new("v1", ms("2023-01-01")),
            VersionRecord::new("v2", ms("2023-06-01")),
            VersionRecord::new("v3", ms("2024-01-01")),
        ];
        let chosen = select_latest(&records, day("2023-12-31")).unwrap();
        assert_eq!(chosen.version, "v2");
    }

    #[test]
    fn test_select_latest_includes_cutoff_day() {
        let records = vec![
            VersionRecord::new("1.0", ms("2023-01-01")),
            // 18:00 UTC on the cutoff day itself
            VersionRecord::new("1.1", ms("2023-06-01") + 18 * 3_600_000),
        ];
        let chosen = select_latest(&records, day("2023-06-01")).unwrap();
        assert_eq!(chosen.version, "1.1");
    }

    #[test]
    fn test_select_latest_all_after_cutoff() {
        let records = vec![
            VersionRecord::new("2.0", ms("2024-02-01")),
            VersionRecord::new("2.1", ms("2024-03-01")),
        ];
        assert!(select_latest(&records, day("2024-01-31")).is_none());
    }

    #[test]
    fn test_select_latest_empty() {
        assert!(select_latest(&[], day("2024-01-31")).is_none());
    }

    #[test]
    fn test_select_latest_skips_missing_timestamps() {
        let records = vec![
            VersionRecord {
                version: "9.9".into(),
                timestamp: None,
                build: None,
            },
            VersionRecord::new("1.0", ms("2020-01-01")),
        ];
        let chosen = select_latest(&records, day("2023-01-01")).unwrap();
        assert_eq!(chosen.version, "1.0");
    }

    #[test]
    fn test_same_day_tie_uses_timestamp() {
        let base = ms("2023-05-10");
        let records = vec![
            VersionRecord::new("1.1.0", base + 1_000),
            VersionRecord::new("1.0.9", base + 5_000),
        ];
        let chosen = select_latest(&records, day("2023-05-10")).unwrap();
        assert_eq!(chosen.version, "1.0.9");
    }

    #[test]
    fn test_identical_timestamp_tie_uses_version() {
        let t = ms("2023-05-10");
        let forward = vec![VersionRecord::new("1.9.0", t), VersionRecord::new("1.10.0", t)];
        let reverse: Vec<_> = forward.iter().rev().cloned().collect();

        assert_eq!(select_latest(&forward, day("2023-05-10")).unwrap().version, "1.10.0");
        assert_eq!(select_latest(&reverse, day("2023-05-10")).unwrap().version, "1.10.0");
    }

    #[rstest]
    #[case("1.0-1", "1.0.1", "1.0.1")]
    #[case("1.0", "1.00", "1.00")]
    fn test_equivalent_spellings_pick_same_record(
        #[case] first: &str,
        #[case] second: &str,
        #[case] expected: &str,
    ) {
        let t = ms("2023-05-10");
        let forward = vec![VersionRecord::new(first, t), VersionRecord::new(second, t)];
        let reverse: Vec<_> = forward.iter().rev().cloned().collect();

        assert_eq!(select_latest(&forward, day("2023-05-10")).unwrap().version, expected);
        assert_eq!(select_latest(&reverse, day("2023-05-10")).unwrap().version, expected);
    }

    #[rstest]
    #[case("2023-06-01", Some((2023, 6, 1)))]
    #[case("2024-02-29", Some((2024, 2, 29)))]
    #[case("2023-02-29", None)]
    #[case("2023-6-1", None)]
    #[case("06/01/2023", None)]
    #[case("2023-06-01T00:00", None)]
    #[case("", None)]
    fn test_parse_cutoff(#[case] input: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let parsed = parse_cutoff(input).ok();
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_cutoff_error_names_input() {
        let err = parse_cutoff("yesterday").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { ref input } if input == "yesterday"));
    }

    struct FixedIndex(Vec<VersionRecord>);

    impl PackageIndex for FixedIndex {
        fn id(&self) -> &str {
            "fixed"
        }

        fn search(&self, _package: &str) -> Result<Vec<VersionRecord>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_resolve_returns_version_and_date() {
        let resolver = VersionResolver::new(FixedIndex(vec![
            VersionRecord::new("1.23.5", ms("2022-11-20")),
            VersionRecord::new("1.24.0", ms("2022-12-18")),
            VersionRecord::new("1.25.0", ms("2023-06-17")),
        ]));

        let resolved = resolver.resolve("numpy", day("2023-06-01")).unwrap();
        assert_eq!(
            resolved,
            ResolvedVersion {
                package: "numpy".into(),
                version: "1.24.0".into(),
                published: day("2022-12-18"),
                timestamp: ms("2022-12-18"),
            }
        );
    }

    #[test]
    fn test_resolve_not_found_names_package_and_cutoff() {
        let resolver = VersionResolver::new(FixedIndex(vec![VersionRecord::new(
            "3.0",
            ms("2024-01-01"),
        )]));

        let err = resolver.resolve("polars", day("2023-01-01")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "No version of polars published on or before 2023-01-01"
        );
    }
}
