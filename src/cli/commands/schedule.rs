use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::attendance::resolver::record_segments;
use crate::core::schedule::{ScheduleLogic, ScheduleRequest};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ScheduleRecord, ScheduleScope};
use crate::models::shift::ShiftSegment;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_name;
use crate::utils::date::parse_optional_date;
use crate::utils::table::Table;
use crate::utils::time::device_now;

fn scope_label(rec: &ScheduleRecord) -> String {
    match &rec.scope {
        ScheduleScope::Pinned { date } => date.format("%Y-%m-%d").to_string(),
        ScheduleScope::Recurring {
            valid_from,
            valid_to,
        } => {
            let from = valid_from.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or("…".into());
            let to = valid_to.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or("…".into());
            format!("{from} → {to}")
        }
    }
}

fn shifts_label(rec: &ScheduleRecord) -> String {
    let segments = record_segments(rec);
    if segments.is_empty() {
        "-".to_string()
    } else {
        ShiftSegment::join(&segments)
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule {
        user,
        date,
        from,
        to,
        note,
        shift,
        list,
        delete,
    } = &cli.command
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    // ---- LIST ----
    if *list {
        let records = ScheduleLogic::list(&pool.conn, user)?;
        if records.is_empty() {
            info(format!("No schedule records for {}", colorize_name(user)));
            return Ok(());
        }

        println!("🗓️  Schedule records for {}:\n", colorize_name(user));
        let mut table = Table::new(&["ID", "SCOPE", "TYPE", "SHIFTS", "NOTE"]);
        for rec in &records {
            table.add_row(vec![
                rec.id.to_string(),
                scope_label(rec),
                format!("{:?}", rec.day_type()),
                shifts_label(rec),
                rec.note.clone(),
            ]);
        }
        print!("{}", table.render());
        return Ok(());
    }

    // ---- DELETE ----
    if let Some(id) = delete {
        ScheduleLogic::delete(&pool.conn, user, *id)?;
        audit(&pool.conn, "schedule_del", user, &format!("Deleted schedule record {id}"));
        success(format!("Schedule record {id} deleted"));
        return Ok(());
    }

    // ---- ADD ----
    let req = ScheduleRequest {
        date: parse_optional_date(date.as_ref()).map_err(AppError::InvalidDate)?,
        valid_from: parse_optional_date(from.as_ref()).map_err(AppError::InvalidDate)?,
        valid_to: parse_optional_date(to.as_ref()).map_err(AppError::InvalidDate)?,
        note: note.clone(),
        shifts: shift.clone(),
    };

    let created_at = cli.at.unwrap_or_else(device_now);
    let rec = ScheduleLogic::add(&pool.conn, user, &req, created_at)?;

    audit(
        &pool.conn,
        "schedule_add",
        user,
        &format!("Record {} ({}) shifts {}", rec.id, scope_label(&rec), shifts_label(&rec)),
    );

    success(format!(
        "Schedule record {} saved for {}: {} [{}]",
        rec.id,
        colorize_name(user),
        scope_label(&rec),
        shifts_label(&rec)
    ));
    Ok(())
}
