//! Property tests for date-bounded selection.

use chrono::NaiveDate;
use envpin_resolver::{VersionRecord, select_latest};
use proptest::prelude::*;

const DAY_MS: i64 = 86_400_000;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn day_offset(date: NaiveDate) -> i64 {
    (date - base()).num_days()
}

fn arb_version() -> impl Strategy<Value = String> {
    // Separators and zero padding produce spellings that compare equal
    // segment by segment, e.g. `1.0-1` and `1.00.1`.
    (
        0u32..5,
        prop::sample::select(vec!['.', '-', '_']),
        0u32..5,
        any::<bool>(),
    )
        .prop_map(|(major, sep, minor, padded)| {
            if padded {
                format!("{}{}{:02}", major, sep, minor)
            } else {
                format!("{}{}{}", major, sep, minor)
            }
        })
}

fn arb_records() -> impl Strategy<Value = Vec<VersionRecord>> {
    let start = base().and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis();
    prop::collection::vec(
        (arb_version(), 0i64..1500, 0i64..3, any::<bool>()),
        0..30,
    )
    .prop_map(move |items| {
        items
            .into_iter()
            .map(|(version, days, hour, has_ts)| VersionRecord {
                version,
                timestamp: has_ts.then_some(start + days * DAY_MS + hour * 3_600_000),
                build: None,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_selected_record_never_exceeds_cutoff(
        records in arb_records(),
        cutoff_days in 0i64..1500,
    ) {
        let cutoff = base() + chrono::Duration::days(cutoff_days);
        if let Some(chosen) = select_latest(&records, cutoff) {
            let published = chosen.published_on().unwrap();
            prop_assert!(published <= cutoff);

            // No eligible record is published on a later day
            for record in &records {
                if let Some(day) = record.published_on() {
                    if day <= cutoff {
                        prop_assert!(day_offset(day) <= day_offset(published));
                    }
                }
            }
        } else {
            prop_assert!(records
                .iter()
                .filter_map(VersionRecord::published_on)
                .all(|day| day > cutoff));
        }
    }

    #[test]
    fn prop_selection_ignores_record_order(
        records in arb_records(),
        cutoff_days in 0i64..1500,
    ) {
        let cutoff = base() + chrono::Duration::days(cutoff_days);
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = select_latest(&records, cutoff).map(|r| (r.version.clone(), r.timestamp));
        let backward = select_latest(&reversed, cutoff).map(|r| (r.version.clone(), r.timestamp));
        prop_assert_eq!(forward, backward);
    }
}
