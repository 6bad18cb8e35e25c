use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};
use tracing::warn;

/// Append one line to the `log` audit table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

/// Audit after the fact: the action already happened, so a failed log
/// write is reported but never turns the command into a failure.
pub fn audit(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warn!(operation, target, error = %e, "failed to write internal log");
    }
}
