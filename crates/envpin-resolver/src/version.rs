//! Ordering for conda-style version strings

use std::cmp::Ordering;

const SEPARATORS: [char; 4] = ['.', '-', '_', '+'];

/// Compare two version strings segment by segment.
///
/// Numeric segments compare numerically and sort above alphabetic ones
/// (`1.0.1 > 1.0.rc1`). When one version is a prefix of the other the
/// longer one is greater (`1.2.1 > 1.2`). Spellings that compare equal
/// segment-wise (`1.0` and `1.00`) fall back to byte order, so distinct
/// strings never compare `Equal`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    compare_segments(a, b).then_with(|| a.cmp(b))
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    let mut left = a.split(SEPARATORS);
    let mut right = b.split(SEPARATORS);

    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => match compare_segment(l, r) {
                Ordering::Equal => continue,
                other => return other,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

fn compare_segment(l: &str, r: &str) -> Ordering {
    match (l.parse::<u64>(), r.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => l.cmp(r),
    }
}
