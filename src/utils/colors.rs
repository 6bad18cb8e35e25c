/// ANSI color helper utilities for terminal output.
use crate::models::state::PunchState;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

const NAME_PALETTE: &[&str] = &[
    RED,
    GREEN,
    YELLOW,
    BLUE,
    MAGENTA,
    CYAN,
    "\x1b[91m",
    "\x1b[92m",
    "\x1b[93m",
    "\x1b[94m",
    "\x1b[95m",
    "\x1b[96m",
];

/// Stable colour for a staff name: FNV-1a over the trimmed, lowercased
/// name, so the same person gets the same colour in every run.
pub fn color_for_name(name: &str) -> &'static str {
    let mut hash: u32 = 0x811c_9dc5;
    for b in name.trim().to_lowercase().bytes() {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    NAME_PALETTE[(hash as usize) % NAME_PALETTE.len()]
}

pub fn colorize_name(name: &str) -> String {
    format!("{}{}{}", color_for_name(name), name, RESET)
}

/// Green when a punch is possible, red for problems, grey when idle.
pub fn color_for_state(state: PunchState) -> &'static str {
    match state {
        PunchState::ReadyIn | PunchState::ReadyOut => GREEN,
        PunchState::MissedOut | PunchState::Absent => RED,
        PunchState::Locked | PunchState::Waiting => YELLOW,
        PunchState::Completed => CYAN,
        PunchState::NextShift | PunchState::Off => GREY,
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}
