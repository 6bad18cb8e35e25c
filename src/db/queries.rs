use crate::core::clock::ClockSync;
use crate::errors::{AppError, AppResult};
use crate::models::override_grant::OverrideGrant;
use crate::models::punch::{PunchEvent, ViolationKind};
use crate::models::punch_kind::PunchKind;
use crate::models::schedule::{ScheduleRecord, ScheduleScope};
use crate::models::shift::ShiftSegment;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_error(0, AppError::InvalidDate(s)))
    })
    .transpose()
}

fn parse_ts_col(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| {
        NaiveDateTime::parse_from_str(&s, TS_FMT).map_err(|_| conversion_error(0, AppError::InvalidTime(s)))
    })
    .transpose()
}

fn required_ts(row: &Row, col: &str) -> Result<NaiveDateTime> {
    parse_ts_col(row, col)?
        .ok_or_else(|| conversion_error(0, AppError::InvalidTime(format!("missing {col}"))))
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn fmt_ts(ts: NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

// ---------------------------
// Schedules
// ---------------------------

pub fn map_schedule_row(row: &Row) -> Result<ScheduleRecord> {
    let scope = match parse_date_col(row, "date")? {
        Some(date) => ScheduleScope::Pinned { date },
        None => ScheduleScope::Recurring {
            valid_from: parse_date_col(row, "valid_from")?,
            valid_to: parse_date_col(row, "valid_to")?,
        },
    };
    let segments: String = row.get("segments")?;

    Ok(ScheduleRecord {
        id: row.get("id")?,
        user: row.get("user")?,
        scope,
        note: row.get("note")?,
        segments: ShiftSegment::split_stored(&segments),
        created_at: required_ts(row, "created_at")?,
    })
}

pub fn insert_schedule(conn: &Connection, rec: &ScheduleRecord) -> AppResult<i64> {
    let (date, from, to) = match &rec.scope {
        ScheduleScope::Pinned { date } => (Some(fmt_date(*date)), None, None),
        ScheduleScope::Recurring {
            valid_from,
            valid_to,
        } => (None, valid_from.map(fmt_date), valid_to.map(fmt_date)),
    };

    conn.execute(
        "INSERT INTO schedules (user, date, valid_from, valid_to, note, segments, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.user,
            date,
            from,
            to,
            rec.note,
            ShiftSegment::join(&rec.segments),
            fmt_ts(rec.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_schedules_for_user(conn: &Connection, user: &str) -> AppResult<Vec<ScheduleRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM schedules
         WHERE user = ?1
         ORDER BY created_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([user], map_schedule_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records are never edited: removing one is the only way to retract it.
pub fn delete_schedule(conn: &Connection, user: &str, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM schedules WHERE id = ?1 AND user = ?2", params![id, user])?;
    if n == 0 {
        return Err(AppError::UnknownSchedule(id));
    }
    Ok(())
}

// ---------------------------
// Punches
// ---------------------------

pub fn map_punch_row(row: &Row) -> Result<PunchEvent> {
    let kind_str: String = row.get("kind")?;
    let kind = PunchKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidPunchKind(kind_str.clone())))?;
    let flags: String = row.get("flags")?;

    Ok(PunchEvent {
        id: row.get("id")?,
        user: row.get("user")?,
        kind,
        server_ts: required_ts(row, "server_ts")?,
        device_ts: parse_ts_col(row, "device_ts")?,
        is_suspicious: row.get::<_, i32>("suspicious")? == 1,
        flags: ViolationKind::split(&flags),
    })
}

pub fn load_punches_by_date(conn: &Connection, user: &str, date: NaiveDate) -> AppResult<Vec<PunchEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE user = ?1 AND date = ?2
         ORDER BY server_ts ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![user, fmt_date(date)], map_punch_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Append a punch. There is no update counterpart.
pub fn insert_punch(conn: &Connection, ev: &PunchEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO punches (user, date, kind, server_ts, device_ts, suspicious, flags, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ev.user,
            fmt_date(ev.date()),
            ev.kind.to_db_str(),
            fmt_ts(ev.server_ts),
            ev.device_ts.map(fmt_ts),
            if ev.is_suspicious { 1 } else { 0 },
            ViolationKind::join(&ev.flags),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ---------------------------
// Override grants
// ---------------------------

pub fn insert_override(conn: &Connection, user: &str, expires_at: NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO overrides (user, expires_at, created_at) VALUES (?1, ?2, ?3)",
        params![user, fmt_ts(expires_at), Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The still-valid grant expiring first, if any.
pub fn load_active_override(
    conn: &Connection,
    user: &str,
    trusted_now: NaiveDateTime,
) -> AppResult<Option<OverrideGrant>> {
    let grant = conn
        .query_row(
            "SELECT id, user, expires_at FROM overrides
             WHERE user = ?1 AND expires_at > ?2
             ORDER BY expires_at ASC, id ASC
             LIMIT 1",
            params![user, fmt_ts(trusted_now)],
            |row| {
                Ok(OverrideGrant {
                    id: row.get("id")?,
                    user: row.get("user")?,
                    expires_at: required_ts(row, "expires_at")?,
                })
            },
        )
        .optional()?;
    Ok(grant)
}

/// Single-statement compare-and-delete: succeeds only for the one caller
/// that removes a still-valid row.
pub fn consume_override(conn: &Connection, grant_id: i64, trusted_now: NaiveDateTime) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM overrides WHERE id = ?1 AND expires_at > ?2",
        params![grant_id, fmt_ts(trusted_now)],
    )?;
    Ok(n == 1)
}

// ---------------------------
// Clock sync
// ---------------------------

pub fn insert_clock_sync(conn: &Connection, sync: &ClockSync) -> AppResult<()> {
    conn.execute(
        "INSERT INTO clock_sync (measured_at, offset_seconds) VALUES (?1, ?2)",
        params![fmt_ts(sync.measured_at), sync.offset_seconds],
    )?;
    Ok(())
}

pub fn latest_clock_sync(conn: &Connection) -> AppResult<Option<ClockSync>> {
    let sync = conn
        .query_row(
            "SELECT measured_at, offset_seconds FROM clock_sync ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                Ok(ClockSync {
                    measured_at: required_ts(row, "measured_at")?,
                    offset_seconds: row.get("offset_seconds")?,
                })
            },
        )
        .optional()?;
    Ok(sync)
}
