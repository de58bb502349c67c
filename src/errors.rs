//! Unified application error type.
//! Every core operation returns AppError, so the command line (or any other
//! front end) receives a typed outcome instead of a raw SQLite error.

use rusqlite::ErrorCode;
use rusqlite::ffi;
use std::io;
use thiserror::Error;

/// Coarse classification used by front ends to decide how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Reference,
    NotFound,
    Unavailable,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid status: {0} (expected work, stop, repair or holiday)")]
    InvalidStatus(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    // ---------------------------
    // Integrity
    // ---------------------------
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    #[error("Referenced {entity} #{id} does not exist")]
    ReferenceNotFound { entity: &'static str, id: i64 },

    #[error("Foreign key violation: {0}")]
    BrokenReference(String),

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Config / export
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_)
            | AppError::InvalidStatus(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidTime(_) => ErrorKind::Validation,
            AppError::Duplicate(_) => ErrorKind::Conflict,
            AppError::ReferenceNotFound { .. } | AppError::BrokenReference(_) => {
                ErrorKind::Reference
            }
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::StorageUnavailable(_) => ErrorKind::Unavailable,
            AppError::Storage(_)
            | AppError::Migration(_)
            | AppError::Io(_)
            | AppError::Config(_)
            | AppError::Export(_) => ErrorKind::Internal,
        }
    }

    /// True when retrying the same operation later may succeed.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Unavailable
    }

    /// Message meant for the end user.
    ///
    /// Validation and reference failures are shown as-is next to the input
    /// that caused them; storage trouble collapses into a generic retry hint.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Unavailable => "Storage is busy, please try again.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        let rusqlite::Error::SqliteFailure(err, detail) = &e else {
            return AppError::Storage(e.to_string());
        };

        let detail = detail.clone().unwrap_or_else(|| err.to_string());

        match err.code {
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::CannotOpen
            | ErrorCode::DiskFull
            | ErrorCode::SystemIoFailure => AppError::StorageUnavailable(detail),
            ErrorCode::ConstraintViolation => match err.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    AppError::Duplicate(detail)
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => AppError::BrokenReference(detail),
                _ => AppError::Validation(detail),
            },
            _ => AppError::Storage(detail),
        }
    }
}

