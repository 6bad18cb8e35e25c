//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Failure to extract a time of day from a piece of shift text.
///
/// Never fatal: the clause carrying the text is dropped from the day's
/// shift list and a warning is logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("no time found in '{0}'")]
    NoTime(String),

    #[error("hour out of range in '{0}'")]
    HourOutOfRange(String),

    #[error("minute out of range in '{0}'")]
    MinuteOutOfRange(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Time parse failure: {0}")]
    TimeParse(#[from] TimeParseError),

    #[error("Invalid punch kind: {0}")]
    InvalidPunchKind(String),

    // ---------------------------
    // Attendance errors
    // ---------------------------
    #[error("No schedule record with id {0}")]
    UnknownSchedule(i64),

    #[error("Trusted clock not synchronized: {0}")]
    ClockUntrusted(String),

    #[error("Punch not allowed now: {0}")]
    PunchNotAllowed(String),

    #[error("Override grant expired or already consumed for {0}")]
    OverrideUnavailable(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
