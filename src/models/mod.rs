pub mod override_grant;
pub mod punch;
pub mod punch_kind;
pub mod schedule;
pub mod shift;
pub mod state;
