use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Named thresholds of the matcher and the punch state machine, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunchWindows {
    /// How early an IN may be and still be matched to a segment.
    pub match_pre_window: i32,
    /// An IN must precede `end - match_in_end_margin` to be matched.
    pub match_in_end_margin: i32,
    /// Without an IN, an OUT must be at least this far past the start.
    pub out_min_after_start: i32,
    /// Punch-in opens this long before the start.
    pub in_open_before: i32,
    /// After the end, a segment without IN reads ABSENT for this long.
    pub absent_after_end: i32,
    /// Punch-out opens this long before the end.
    pub out_lock_margin: i32,
    /// Punch-out stays open this long after the end.
    pub out_grace: i32,
    /// After the end, MISSED_OUT is reported until this offset.
    pub missed_out_cutoff: i32,
    /// COMPLETED stays on screen this long after the OUT.
    pub completed_display: i32,
    /// For segments that cross midnight, a minute earlier than
    /// `start - early_morning_wrap` (and before `end + missed_out_cutoff`)
    /// is read as the next day.
    pub early_morning_wrap: i32,
    /// An IN later than `start + late_grace` is flagged LateIn.
    pub late_grace: i32,
}

impl Default for PunchWindows {
    fn default() -> Self {
        Self {
            match_pre_window: 120,
            match_in_end_margin: 1,
            out_min_after_start: 5,
            in_open_before: 60,
            absent_after_end: 60,
            out_lock_margin: 15,
            out_grace: 60,
            missed_out_cutoff: 90,
            completed_display: 60,
            early_morning_wrap: 180,
            late_grace: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockPolicy {
    /// A sync older than this makes the clock untrusted.
    pub max_sync_age_hours: i64,
    /// Offsets larger than this flag the punch as suspicious.
    pub suspicious_skew_minutes: i64,
}

impl Default for ClockPolicy {
    fn default() -> Self {
        Self {
            max_sync_age_hours: 24,
            suspicious_skew_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub windows: PunchWindows,
    #[serde(default)]
    pub clock: ClockPolicy,
    /// Dates on which Holiday-tagged recurring schedules apply.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            windows: PunchWindows::default(),
            clock: ClockPolicy::default(),
            holidays: Vec::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rshiftclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rshiftclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rshiftclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rshiftclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
