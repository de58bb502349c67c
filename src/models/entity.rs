use serde::Serialize;

/// The three lookup tables that only carry a unique name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Machine,
    Driver,
    Counterparty,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Machine => "machines",
            EntityKind::Driver => "drivers",
            EntityKind::Counterparty => "counterparties",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Machine => "machine",
            EntityKind::Driver => "driver",
            EntityKind::Counterparty => "counterparty",
        }
    }
}

/// A row of `machines`, `drivers` or `counterparties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
}

/// Result of an add-by-name operation. A duplicate name is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted(i64),
    AlreadyExists,
}

/// Result of a delete-by-id operation. A missing id is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
}

impl DeleteOutcome {
    pub fn from_affected(n: usize) -> Self {
        if n > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Missing
        }
    }
}
