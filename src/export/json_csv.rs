// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::ReportRow;

/// JSON pretty-printed.
pub(crate) fn build_json(rows: &[ReportRow]) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// CSV with a header row taken from the serde field names.
pub(crate) fn build_csv(rows: &[ReportRow]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
