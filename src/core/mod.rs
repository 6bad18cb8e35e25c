pub mod attendance;
pub mod clock;
pub mod config;
pub mod grant;
pub mod log;
pub mod logic;
pub mod punch;
pub mod schedule;
pub mod store;
