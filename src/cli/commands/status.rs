use crate::cli::commands::trusted_clock;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{RESET, YELLOW, color_for_state, colorize_name};
use crate::utils::formatting::bold;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Status { user, json } = &cli.command else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let clock = trusted_clock(cli, &pool, cfg)?;

    // 1️⃣ untrusted time is a state of its own, not a failure
    let now = match clock.now() {
        Ok(now) => now,
        Err(AppError::ClockUntrusted(reason)) => {
            if *json {
                let body = serde_json::json!({
                    "user": user,
                    "state": "SYNCING",
                    "can_punch": false,
                    "reason": reason,
                });
                println!("{}", serde_json::to_string_pretty(&body).map_err(|e| AppError::Other(e.to_string()))?);
            } else {
                println!("{}: {YELLOW}{}{RESET}", colorize_name(user), bold("SYNCING"));
                println!("   Waiting for a trusted time source ({reason})");
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // 2️⃣ evaluate
    let eval = Core::evaluate(&pool, user, now.corrected, cfg)?;

    if *json {
        let out = serde_json::to_string_pretty(&eval).map_err(|e| AppError::Other(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    let report = &eval.report;
    let color = color_for_state(report.state);
    println!(
        "{} @ {}: {}{}{}",
        colorize_name(user),
        eval.now.format("%Y-%m-%d %H:%M"),
        color,
        bold(report.state.as_str()),
        RESET
    );
    if !report.primary.is_empty() {
        println!("   {}", report.primary);
    }
    if !report.secondary.is_empty() {
        println!("   {}", report.secondary);
    }
    if report.relies_on_override {
        println!("   (override grant will be consumed)");
    }

    Ok(())
}
