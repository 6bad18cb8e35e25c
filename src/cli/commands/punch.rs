use crate::cli::commands::trusted_clock;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::punch::PunchLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::punch::ViolationKind;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{colorize_in_out, colorize_name};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Punch { user } = &cli.command else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let clock = trusted_clock(cli, &pool, cfg)?;

    let outcome = PunchLogic::apply(&pool, clock.as_ref(), user, cfg)?;
    let ev = &outcome.event;

    let flags = ViolationKind::join(&ev.flags);
    audit(
        &pool.conn,
        "punch",
        user,
        &format!(
            "{} at {} (id {}){}",
            ev.kind,
            ev.server_ts.format("%Y-%m-%d %H:%M:%S"),
            ev.id,
            if flags.is_empty() { String::new() } else { format!(" flags: {flags}") }
        ),
    );
    if outcome.consumed_override {
        audit(&pool.conn, "override_consumed", user, &format!("Used by punch {}", ev.id));
    }

    let label = ev.kind.to_string();
    success(format!(
        "{} punched {} at {}",
        colorize_name(user),
        colorize_in_out(&label, ev.kind.is_in()),
        ev.time_str()
    ));

    for flag in &ev.flags {
        match flag {
            ViolationKind::ClockSkew => warning("Device clock differs from trusted time, punch marked suspicious"),
            ViolationKind::OverridePunch => warning("Punch taken through an override grant"),
            ViolationKind::LateIn => warning("Late punch-in"),
            ViolationKind::EarlyOut => warning("Early punch-out"),
        }
    }

    Ok(())
}
