// src/export/model.rs

use crate::models::record::RecordRow;
use crate::models::status::Status;
use crate::utils::date::display_date;
use serde::Serialize;

pub(crate) const PLACEHOLDER: &str = "-";

/// Column titles, in output order.
pub const REPORT_HEADERS: [&str; 9] = [
    "Date",
    "Machine",
    "Driver",
    "Status",
    "Start",
    "End",
    "Hours",
    "Counterparty",
    "Comment",
];

pub(crate) const STATUS_COL: usize = 3;
pub(crate) const HOURS_COL: usize = 6;

/// One flattened report line; optional fields are already replaced by "-".
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Machine")]
    pub machine: String,
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Status")]
    pub status_label: String,
    #[serde(rename = "Start")]
    pub start_time: String,
    #[serde(rename = "End")]
    pub end_time: String,
    #[serde(rename = "Hours")]
    pub hours: u32,
    #[serde(rename = "Counterparty")]
    pub counterparty: String,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(skip)]
    pub status: Status,
}

fn or_placeholder(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn name_or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

impl From<&RecordRow> for ReportRow {
    fn from(r: &RecordRow) -> Self {
        ReportRow {
            date: display_date(&r.date),
            machine: name_or_placeholder(&r.machine),
            driver: name_or_placeholder(&r.driver),
            status_label: r.status.label().to_string(),
            start_time: or_placeholder(&r.start_time),
            end_time: or_placeholder(&r.end_time),
            hours: r.hours,
            counterparty: or_placeholder(&r.counterparty),
            comment: or_placeholder(&r.comment),
            status: r.status,
        }
    }
}

impl ReportRow {
    /// Cell texts in `REPORT_HEADERS` order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.date.clone(),
            self.machine.clone(),
            self.driver.clone(),
            self.status_label.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.hours.to_string(),
            self.counterparty.clone(),
            self.comment.clone(),
        ]
    }
}
