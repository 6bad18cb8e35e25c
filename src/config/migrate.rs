//! Configuration file upgrades: detect keys missing from an older file and
//! rewrite it with the current defaults filled in.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Dotted key paths present in the default configuration but absent from `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<String>> {
    let current: Value = serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    let defaults = serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)?;

    let mut out = Vec::new();
    collect_missing(&defaults, &current, "", &mut out);
    Ok(out)
}

fn collect_missing(defaults: &Value, current: &Value, prefix: &str, out: &mut Vec<String>) {
    let Some(def_map) = defaults.as_mapping() else {
        return;
    };

    for (k, def_val) in def_map {
        let Some(key) = k.as_str() else { continue };
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };

        match current.as_mapping().and_then(|m| m.get(k)) {
            None => out.push(path),
            Some(cur_val) => collect_missing(def_val, cur_val, &path, out),
        }
    }
}

/// Rewrite the config file so that every field is explicit.
/// Returns `Ok(false)` when nothing was missing.
pub fn run_config_migration(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!("No configuration file at {}", path.display()));
        return Ok(false);
    }

    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;
    if missing.is_empty() {
        return Ok(false);
    }

    // serde defaults fill every absent field
    let cfg = Config::from_yaml(&content)?;
    fs::write(path, cfg.to_yaml()?).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration upgraded, added: {}",
        missing.join(", ")
    ));
    Ok(true)
}
