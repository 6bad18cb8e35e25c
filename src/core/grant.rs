use crate::db::queries::insert_override;
use crate::errors::{AppError, AppResult};
use crate::models::override_grant::OverrideGrant;
use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

pub struct GrantLogic;

impl GrantLogic {
    /// Issue a single-use override valid for `minutes` of trusted time.
    pub fn grant(
        conn: &Connection,
        user: &str,
        minutes: i64,
        trusted_now: NaiveDateTime,
    ) -> AppResult<OverrideGrant> {
        if minutes <= 0 {
            return Err(AppError::Other(format!(
                "override duration must be positive, got {minutes}"
            )));
        }

        let expires_at = trusted_now + Duration::minutes(minutes);
        let id = insert_override(conn, user, expires_at)?;

        Ok(OverrideGrant {
            id,
            user: user.to_string(),
            expires_at,
        })
    }
}
