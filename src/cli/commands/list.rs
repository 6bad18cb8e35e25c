use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::attendance::{carried_over, match_shifts, resolve_with_holidays};
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::punch::ViolationKind;
use crate::ui::messages::info;
use crate::utils::colors::colorize_name;
use crate::utils::date::{parse_optional_date, today, with_weekday};
use crate::utils::table::Table;
use chrono::Days;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::List { user, date } = &cli.command else {
        return Ok(());
    };

    let day = parse_optional_date(date.as_ref())
        .map_err(AppError::InvalidDate)?
        .or(cli.at.map(|t| t.date()))
        .unwrap_or_else(today);

    let pool = DbPool::new(&cfg.database)?;

    // 1️⃣ raw punches of the day
    let logs = pool.punches_for_date(user, day)?;

    println!("📋 {} on {}\n", colorize_name(user), with_weekday(day));

    if logs.is_empty() {
        info("No punches recorded");
    } else {
        let mut table = Table::new(&["ID", "KIND", "SERVER", "DEVICE", "FLAGS"]);
        for ev in &logs {
            let kind = ev.kind.to_string();
            table.add_row(vec![
                ev.id.to_string(),
                kind,
                ev.time_str(),
                ev.device_ts.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or("-".into()),
                ViolationKind::join(&ev.flags),
            ]);
        }
        print!("{}", table.render());
    }

    // 2️⃣ matched segments; the next day's logs may close an overnight shift
    let segments = resolve_with_holidays(&pool.schedules_for_user(user)?, day, &cfg.holidays);
    if segments.is_empty() {
        println!();
        info("No shift scheduled");
        return Ok(());
    }

    let mut all = logs;
    if let Some(next) = day.checked_add_days(Days::new(1)) {
        let next_logs = pool.punches_for_date(user, next)?;
        all.extend(carried_over(&next_logs, &segments, day, &cfg.windows));
    }
    all.sort_by(|a, b| a.server_ts.cmp(&b.server_ts).then(a.id.cmp(&b.id)));

    let matched = match_shifts(&all, &segments, day, &cfg.windows);

    println!();
    let mut table = Table::new(&["SHIFT", "SEGMENT", "IN", "OUT"]);
    for m in &matched {
        table.add_row(vec![
            (m.index + 1).to_string(),
            m.segment.to_string(),
            m.punch_in.as_ref().map(|p| p.event.time_str()).unwrap_or("-".into()),
            m.punch_out.as_ref().map(|p| p.event.time_str()).unwrap_or("-".into()),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}
