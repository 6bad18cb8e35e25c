use crate::errors::AppResult;
use crate::models::override_grant::OverrideGrant;
use crate::models::punch::PunchEvent;
use crate::models::schedule::ScheduleRecord;
use chrono::{NaiveDate, NaiveDateTime};

/// Data access the engine needs from its host.
pub trait AttendanceStore {
    /// Every record for the user, no date filter.
    fn schedules_for_user(&self, user: &str) -> AppResult<Vec<ScheduleRecord>>;

    /// Punches on one local calendar day.
    fn punches_for_date(&self, user: &str, date: NaiveDate) -> AppResult<Vec<PunchEvent>>;

    fn active_override(&self, user: &str, trusted_now: NaiveDateTime) -> AppResult<Option<OverrideGrant>>;

    /// Atomic delete-if-still-valid. `Ok(false)` when the grant expired or
    /// another caller consumed it first.
    fn consume_override(&self, grant_id: i64, trusted_now: NaiveDateTime) -> AppResult<bool>;

    /// Append a punch, returning its id.
    fn record_punch(&self, event: &PunchEvent) -> AppResult<i64>;
}
