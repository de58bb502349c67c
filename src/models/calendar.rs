use super::entity::NamedEntity;
use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// One record as shown inside a calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub record_id: i64,
    pub driver: String,
    pub status: Status,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub counterparty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: Vec<DayEntry>,
}

/// Every day of one month for one machine, ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub machine: NamedEntity,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthView {
    pub fn record_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}
