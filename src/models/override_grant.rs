use chrono::NaiveDateTime;
use serde::Serialize;

/// Supervisor-issued, single-use bypass of the punch windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideGrant {
    pub id: i64,
    pub user: String,
    pub expires_at: NaiveDateTime,
}

impl OverrideGrant {
    /// Checked against trusted time only; an expired grant is never active.
    pub fn is_active_at(&self, trusted_now: NaiveDateTime) -> bool {
        trusted_now < self.expires_at
    }
}
