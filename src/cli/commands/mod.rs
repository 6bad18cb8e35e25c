pub mod config;
pub mod grant;
pub mod init;
pub mod list;
pub mod log;
pub mod parse;
pub mod punch;
pub mod schedule;
pub mod status;
pub mod sync;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::{FixedClock, SyncedClock, TrustedClock};
use crate::db::pool::DbPool;
use crate::db::queries::latest_clock_sync;
use crate::errors::AppResult;
use crate::utils::time::device_now;

/// `--at` pins trusted time; otherwise the device clock is corrected by the
/// latest stored sync.
pub(crate) fn trusted_clock(cli: &Cli, pool: &DbPool, cfg: &Config) -> AppResult<Box<dyn TrustedClock>> {
    if let Some(at) = cli.at {
        return Ok(Box::new(FixedClock(at)));
    }
    let sync = latest_clock_sync(&pool.conn)?;
    Ok(Box::new(SyncedClock::new(sync, device_now(), &cfg.clock)))
}
