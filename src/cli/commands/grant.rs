use crate::cli::commands::trusted_clock;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::grant::GrantLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::colorize_name;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Grant { user, minutes } = &cli.command else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let now = trusted_clock(cli, &pool, cfg)?.now()?;

    let grant = GrantLogic::grant(&pool.conn, user, *minutes, now.corrected)?;
    let until = grant.expires_at.format("%Y-%m-%d %H:%M:%S");

    audit(&pool.conn, "grant", user, &format!("Override {} valid until {}", grant.id, until));
    success(format!(
        "Override {} granted to {} until {}",
        grant.id,
        colorize_name(user),
        until
    ));
    Ok(())
}
