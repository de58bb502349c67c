use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse "YYYY-MM" into (year, month).
pub fn parse_year_month(s: &str) -> AppResult<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(format!("{s} (expected YYYY-MM)")))?;
    Ok((d.year(), d.month()))
}

/// Every day of the given month, ascending.
pub fn all_days_of_month(year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
    let mut d = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year:04}-{month:02}")))?;

    let mut out = Vec::with_capacity(31);
    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    Ok(out)
}

/// Day-first display form used in listings and reports.
pub fn display_date(d: &NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}
