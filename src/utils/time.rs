//! Time utilities: parsing timestamps given on the command line.

use chrono::NaiveDateTime;

/// Accepts `YYYY-MM-DD HH:MM[:SS]` or the `T`-separated form.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Raw device time: local wall clock, no correction.
pub fn device_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
