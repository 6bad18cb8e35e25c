use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::ClockSync;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::insert_clock_sync;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::device_now;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Sync { reference } = &cli.command else {
        return Ok(());
    };

    // --at stands in for the device clock here
    let device = cli.at.unwrap_or_else(device_now);
    let sync = ClockSync::measure(*reference, device);

    let pool = DbPool::new(&cfg.database)?;
    insert_clock_sync(&pool.conn, &sync)?;

    audit(
        &pool.conn,
        "sync",
        "clock",
        &format!("Offset {}s measured at {}", sync.offset_seconds, device.format("%Y-%m-%d %H:%M:%S")),
    );

    success(format!("Clock synchronized, offset {}s", sync.offset_seconds));
    if sync.offset_seconds.abs() > cfg.clock.suspicious_skew_minutes * 60 {
        warning("Device clock is off by more than the allowed skew, punches will be flagged");
    }
    Ok(())
}
