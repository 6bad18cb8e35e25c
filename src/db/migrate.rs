use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ordered schema steps: (version, description, sql).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20260901_0001_create_schedules",
        "Created schedules table",
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user        TEXT NOT NULL,
            date        TEXT,
            valid_from  TEXT,
            valid_to    TEXT,
            note        TEXT NOT NULL DEFAULT '',
            segments    TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_schedules_user ON schedules(user);
        "#,
    ),
    (
        "20260901_0002_create_punches",
        "Created punches table",
        r#"
        CREATE TABLE IF NOT EXISTS punches (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user        TEXT NOT NULL,
            date        TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('in','out')),
            server_ts   TEXT NOT NULL,
            device_ts   TEXT,
            suspicious  INTEGER NOT NULL DEFAULT 0,
            flags       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_punches_user_date ON punches(user, date, server_ts);
        "#,
    ),
    (
        "20260901_0003_create_overrides",
        "Created overrides table",
        r#"
        CREATE TABLE IF NOT EXISTS overrides (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user        TEXT NOT NULL,
            expires_at  TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_overrides_user ON overrides(user, expires_at);
        "#,
    ),
    (
        "20260915_0004_create_clock_sync",
        "Created clock_sync table",
        r#"
        CREATE TABLE IF NOT EXISTS clock_sync (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            measured_at     TEXT NOT NULL,
            offset_seconds  INTEGER NOT NULL
        );
        "#,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, version: &str, description: &str, sql: &str) -> AppResult<()> {
    conn.execute_batch(sql)
        .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;

    success(format!("Migration applied: {} → {}", version, description));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, description, sql) in MIGRATIONS {
        if !is_applied(conn, version)? {
            apply(conn, version, description, sql)?;
        }
    }

    Ok(())
}
