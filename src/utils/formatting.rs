//! Formatting utilities used for CLI output.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Countdown text for state messages: `45m`, `1h 05m`, `12h 00m`.
/// Negative durations render as `0m`.
pub fn mins2readable(mins: i64) -> String {
    let mins = mins.max(0);
    match (mins / 60, mins % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}
