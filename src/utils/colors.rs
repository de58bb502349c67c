/// ANSI color helper utilities for terminal output.
use crate::models::status::Status;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Terminal counterpart of the report's status fill colours.
pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Work => GREEN,
        Status::Stop => RED,
        Status::Repair => YELLOW,
        Status::Holiday => MAGENTA,
    }
}

/// Render an optional field, greying out the placeholder dash.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}-{RESET}"),
    }
}
