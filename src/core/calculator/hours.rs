//! Elapsed whole hours between two clock times.

use crate::errors::AppResult;
use crate::utils::time::{minutes_between, parse_optional_time};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Whole hours from `start` to `end`, wrapping past midnight when `end` is
/// earlier than `start`. Absent or malformed input yields 0.
pub fn compute_hours(start: Option<&str>, end: Option<&str>) -> u32 {
    try_compute_hours(start, end).ok().flatten().unwrap_or(0)
}

/// Like [`compute_hours`] but reports a malformed time instead of hiding it.
///
/// Returns `Ok(None)` when either side is absent.
pub fn try_compute_hours(start: Option<&str>, end: Option<&str>) -> AppResult<Option<u32>> {
    let start = parse_optional_time(start)?;
    let end = parse_optional_time(end)?;

    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };

    let mut minutes = minutes_between(start, end);
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }

    Ok(Some((minutes / 60) as u32))
}
