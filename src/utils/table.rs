//! Table rendering utilities for CLI outputs.

use crate::utils::colors::RESET;
use unicode_width::UnicodeWidthStr;

pub struct Cell {
    pub text: String,
    pub color: Option<&'static str>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Columns are padded on display width, so Cyrillic or wide names line up.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.text.width());
            }
        }

        let mut out = String::new();

        for (h, w) in self.headers.iter().zip(&widths) {
            out.push_str(&pad(h, *w));
            out.push_str("  ");
        }
        out.push('\n');

        let total: usize = widths.iter().map(|w| w + 2).sum();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            for (cell, w) in row.iter().zip(&widths) {
                let padded = pad(&cell.text, *w);
                match cell.color {
                    Some(c) => out.push_str(&format!("{c}{padded}{RESET}")),
                    None => out.push_str(&padded),
                }
                out.push_str("  ");
            }
            out.push('\n');
        }

        out
    }
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}
