use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Prepare a connection for use: journaling mode, then all pending
/// schema migrations.
///
/// WAL lets a second terminal read punches while another one writes;
/// in-memory databases report `memory` and are left as they are.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    debug!(journal_mode = %mode, "database journaling");

    run_pending_migrations(conn)
}
