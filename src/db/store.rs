use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::override_grant::OverrideGrant;
use crate::models::punch::PunchEvent;
use crate::models::schedule::ScheduleRecord;
use chrono::{NaiveDate, NaiveDateTime};

impl AttendanceStore for DbPool {
    fn schedules_for_user(&self, user: &str) -> AppResult<Vec<ScheduleRecord>> {
        queries::load_schedules_for_user(&self.conn, user)
    }

    fn punches_for_date(&self, user: &str, date: NaiveDate) -> AppResult<Vec<PunchEvent>> {
        queries::load_punches_by_date(&self.conn, user, date)
    }

    fn active_override(&self, user: &str, trusted_now: NaiveDateTime) -> AppResult<Option<OverrideGrant>> {
        queries::load_active_override(&self.conn, user, trusted_now)
    }

    fn consume_override(&self, grant_id: i64, trusted_now: NaiveDateTime) -> AppResult<bool> {
        queries::consume_override(&self.conn, grant_id, trusted_now)
    }

    fn record_punch(&self, event: &PunchEvent) -> AppResult<i64> {
        queries::insert_punch(&self.conn, event)
    }
}
