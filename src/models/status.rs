use serde::Serialize;

/// Operational category of a machine on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Work,
    Stop,
    Repair,
    Holiday,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Work, Status::Stop, Status::Repair, Status::Holiday];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Work => "work",
            Status::Stop => "stop",
            Status::Repair => "repair",
            Status::Holiday => "holiday",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Status::Work),
            "stop" => Some(Status::Stop),
            "repair" => Some(Status::Repair),
            "holiday" => Some(Status::Holiday),
            _ => None,
        }
    }

    /// Capitalised label used in listings and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Work => "Work",
            Status::Stop => "Stop",
            Status::Repair => "Repair",
            Status::Holiday => "Holiday",
        }
    }

    /// Background colour (0xRRGGBB) of the status cell in reports.
    pub fn fill_rgb(&self) -> u32 {
        match self {
            Status::Work => 0xC8E6C9,
            Status::Stop => 0xFFCDD2,
            Status::Repair => 0xFFF9C4,
            Status::Holiday => 0xE1BEE7,
        }
    }
}
