use crate::utils::time::parse_datetime;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

fn parse_at(s: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(s).ok_or_else(|| format!("expected 'YYYY-MM-DD HH:MM[:SS]', got '{s}'"))
}

/// Command-line interface definition for rShiftClock
/// Shift-aware attendance punching backed by SQLite
#[derive(Parser)]
#[command(
    name = "rshiftclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shift attendance CLI: publish schedules, punch in/out and inspect the punch state using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Evaluate at a fixed trusted instant instead of the synced clock
    #[arg(global = true, long = "at", hide = true, value_parser = parse_at)]
    pub at: Option<NaiveDateTime>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Publish, list or retract schedule records for a staff member
    Schedule {
        /// Staff member the record belongs to
        user: String,

        #[arg(long = "date", help = "Pin the record to one day (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "from", help = "First day a recurring record applies (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day a recurring record applies (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(
            long = "note",
            default_value = "",
            help = "Free-text note, e.g. '9am-5pm', 'Friday 10-2', 'Off'"
        )]
        note: String,

        #[arg(long = "shift", help = "Structured segment HH:MM-HH:MM (repeatable)")]
        shift: Vec<String>,

        #[arg(long = "list", help = "List the user's schedule records")]
        list: bool,

        #[arg(long = "delete", value_name = "ID", help = "Delete a schedule record by id")]
        delete: Option<i64>,
    },

    /// Take the punch the current state allows
    Punch {
        user: String,
    },

    /// Show the current punch state
    Status {
        user: String,

        #[arg(long = "json", help = "Print the full evaluation as JSON")]
        json: bool,
    },

    /// List punches and matched shifts for a day
    List {
        user: String,

        #[arg(long = "date", help = "Day to show (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Issue a single-use override grant
    Grant {
        user: String,

        #[arg(long = "minutes", help = "Validity of the grant in minutes")]
        minutes: i64,
    },

    /// Record the offset between the device clock and a reference time
    Sync {
        #[arg(
            long = "reference",
            value_parser = parse_at,
            help = "Reference time 'YYYY-MM-DD HH:MM[:SS]'"
        )]
        reference: NaiveDateTime,
    },

    /// Show the shift segments a piece of schedule text yields
    Parse {
        text: String,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
