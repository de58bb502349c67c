// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{HOURS_COL, REPORT_HEADERS, ReportRow, STATUS_COL};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use unicode_width::UnicodeWidthStr;

const SHEET_NAME: &str = "Equipment report";
const MIN_COLUMN_WIDTH: f64 = 20.0;
const HEADER_BG: u32 = 0x444444;
const HEADER_FG: u32 = 0xFFFFFF;

/// Build the report workbook in memory.
///
/// Header row: bold white on dark grey, frozen. Each status cell is filled
/// with the colour of its status.
pub(crate) fn build_xlsx(rows: &[ReportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FG))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = REPORT_HEADERS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    // ---------------------------
    // Rows
    // ---------------------------
    let text_format = Format::new().set_border(FormatBorder::Thin);
    let hours_format = Format::new()
        .set_align(FormatAlign::Right)
        .set_border(FormatBorder::Thin);

    for (row_index, rec) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;

        for (col, value) in rec.cells().iter().enumerate() {
            let c = col as u16;

            if col == STATUS_COL {
                let status_format = Format::new()
                    .set_background_color(Color::RGB(rec.status.fill_rgb()))
                    .set_pattern(FormatPattern::Solid)
                    .set_border(FormatBorder::Thin);
                worksheet
                    .write_with_format(row, c, value.as_str(), &status_format)
                    .map_err(to_export_error)?;
            } else if col == HOURS_COL {
                worksheet
                    .write_with_format(row, c, f64::from(rec.hours), &hours_format)
                    .map_err(to_export_error)?;
            } else {
                worksheet
                    .write_with_format(row, c, value.as_str(), &text_format)
                    .map_err(to_export_error)?;
            }

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w as f64 + 2.0).max(MIN_COLUMN_WIDTH))
            .map_err(to_export_error)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
