use serde::Serialize;
use std::fmt;

/// The single authoritative state an attendance screen presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchState {
    ReadyIn,
    ReadyOut,
    Locked,
    Completed,
    MissedOut,
    Absent,
    Waiting,
    NextShift,
    Off,
}

impl PunchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchState::ReadyIn => "READY_IN",
            PunchState::ReadyOut => "READY_OUT",
            PunchState::Locked => "LOCKED",
            PunchState::Completed => "COMPLETED",
            PunchState::MissedOut => "MISSED_OUT",
            PunchState::Absent => "ABSENT",
            PunchState::Waiting => "WAITING",
            PunchState::NextShift => "NEXT_SHIFT",
            PunchState::Off => "OFF",
        }
    }
}

impl fmt::Display for PunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which day's schedule the active shift index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDay {
    Today,
    Yesterday,
}

/// Output of one evaluation of the punch state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    pub state: PunchState,
    pub can_punch: bool,
    pub primary: String,
    pub secondary: String,
    /// Zero-based index into the day's segment list, when inside a shift.
    pub active_shift: Option<usize>,
    pub shift_day: ShiftDay,
    /// The permitted punch exists only because of the override grant;
    /// taking it must consume the grant.
    pub relies_on_override: bool,
}

impl StateReport {
    pub fn new(state: PunchState, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            state,
            can_punch: matches!(state, PunchState::ReadyIn | PunchState::ReadyOut),
            primary: primary.into(),
            secondary: secondary.into(),
            active_shift: None,
            shift_day: ShiftDay::Today,
            relies_on_override: false,
        }
    }

    pub fn at_shift(mut self, index: usize, day: ShiftDay) -> Self {
        self.active_shift = Some(index);
        self.shift_day = day;
        self
    }
}
