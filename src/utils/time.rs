//! Time utilities: strict HH:MM parsing and minute arithmetic.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static HHMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("static HH:MM pattern"));

/// Parse a 24-hour "HH:MM" clock time. Single-digit hours are rejected.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    if !HHMM.is_match(t) {
        return None;
    }
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Normalise an optional form field: blank strings count as absent.
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    match non_blank(input) {
        Some(s) => {
            let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
            Ok(Some(t))
        }
        None => Ok(None),
    }
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}
