use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// Raw input of the "add record" form. Nothing here is trusted yet:
/// the date and status are validated and hours are derived on insert.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub date: String,
    pub machine_id: i64,
    pub driver_id: i64,
    pub status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub comment: Option<String>,
    pub counterparty_id: Option<i64>,
}

/// A stored record joined with the names it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: NaiveDate,
    pub machine: String,
    pub driver: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub hours: u32,
    pub comment: Option<String>,
    pub counterparty: Option<String>,
    pub status: Status,
}

impl RecordRow {
    /// "HH:MM - HH:MM" when both ends are known.
    pub fn time_span(&self) -> Option<String> {
        match (&self.start_time, &self.end_time) {
            (Some(s), Some(e)) => Some(format!("{s} - {e}")),
            _ => None,
        }
    }
}

/// What `add_record` reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedRecord {
    pub id: i64,
    pub hours: u32,
    /// Set when a start/end time could not be parsed and hours fell back to 0.
    pub malformed_time: Option<String>,
}
