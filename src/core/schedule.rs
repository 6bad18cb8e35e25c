use crate::core::attendance::resolver::record_segments;
use crate::db::queries::{delete_schedule, insert_schedule, load_schedules_for_user};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ScheduleRecord, ScheduleScope};
use crate::models::shift::ShiftSegment;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tracing::warn;

/// What the caller asked for when publishing a record.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    pub date: Option<NaiveDate>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub note: String,
    /// Strict `HH:MM-HH:MM` values.
    pub shifts: Vec<String>,
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn build(user: &str, req: &ScheduleRequest, created_at: NaiveDateTime) -> AppResult<ScheduleRecord> {
        let scope = match (req.date, req.valid_from, req.valid_to) {
            (Some(date), None, None) => ScheduleScope::Pinned { date },
            (Some(_), _, _) => {
                return Err(AppError::InvalidDate(
                    "--date cannot be combined with --from/--to".into(),
                ));
            }
            (None, Some(f), Some(t)) if t < f => {
                return Err(AppError::InvalidDate(format!("--to {t} is before --from {f}")));
            }
            (None, valid_from, valid_to) => ScheduleScope::Recurring {
                valid_from,
                valid_to,
            },
        };

        let segments = req
            .shifts
            .iter()
            .map(|s| ShiftSegment::parse_pair(s).ok_or_else(|| AppError::InvalidTime(s.clone())))
            .collect::<AppResult<Vec<_>>>()?;

        let record = ScheduleRecord {
            id: 0,
            user: user.to_string(),
            scope,
            note: req.note.trim().to_string(),
            segments,
            created_at,
        };

        // a note that yields no segment is legal ("Off"), but worth a warning
        if record.segments.is_empty() && !record.marks_off() && record_segments(&record).is_empty() {
            warn!(note = %record.note, "schedule record has no parseable shift");
        }

        Ok(record)
    }

    pub fn add(
        conn: &Connection,
        user: &str,
        req: &ScheduleRequest,
        created_at: NaiveDateTime,
    ) -> AppResult<ScheduleRecord> {
        let mut record = Self::build(user, req, created_at)?;
        record.id = insert_schedule(conn, &record)?;
        Ok(record)
    }

    pub fn delete(conn: &Connection, user: &str, id: i64) -> AppResult<()> {
        delete_schedule(conn, user, id)
    }

    pub fn list(conn: &Connection, user: &str) -> AppResult<Vec<ScheduleRecord>> {
        load_schedules_for_user(conn, user)
    }
}
