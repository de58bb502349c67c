// src/export/logic.rs

use crate::db::pool::DbPool;
use crate::db::queries::{DateOrder, load_records};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::json_csv::{build_csv, build_json};
use crate::export::model::ReportRow;
use crate::export::xlsx::build_xlsx;
use chrono::{Local, NaiveDateTime};

/// A freshly generated report, ready to be saved or served as a download.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    /// `report_YYYYMMDD_HHMM.<ext>`, stamped at generation time.
    pub file_name: String,
    pub format: ExportFormat,
    pub generated_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
    pub content: Vec<u8>,
}

/// High-level report export.
pub struct ExportLogic;

impl ExportLogic {
    /// Rebuild the report from the current contents of storage.
    ///
    /// Every record is included, oldest date first. Nothing is kept between
    /// calls; two calls without writes in between yield the same rows.
    pub fn export_report(pool: &DbPool, format: ExportFormat) -> AppResult<ReportDocument> {
        let rows = load_report_rows(pool)?;
        let generated_at = Local::now().naive_local();

        let content = match format {
            ExportFormat::Xlsx => build_xlsx(&rows)?,
            ExportFormat::Csv => build_csv(&rows)?,
            ExportFormat::Json => build_json(&rows)?,
        };

        let file_name = report_file_name(&generated_at, format);

        Ok(ReportDocument {
            file_name,
            format,
            generated_at,
            rows,
            content,
        })
    }
}

pub fn report_file_name(at: &NaiveDateTime, format: ExportFormat) -> String {
    format!("report_{}.{}", at.format("%Y%m%d_%H%M"), format.extension())
}

/// Load every record from storage, oldest date first.
fn load_report_rows(pool: &DbPool) -> AppResult<Vec<ReportRow>> {
    let records = load_records(&pool.conn, DateOrder::Ascending)?;
    Ok(records.iter().map(ReportRow::from).collect())
}
