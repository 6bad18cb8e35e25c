use super::punch_kind::PunchKind;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;

/// Irregularities recorded on a punch at the moment it is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViolationKind {
    /// Corrected time and raw device time disagree beyond the tolerance.
    ClockSkew,
    /// The punch was only permitted by a supervisor override.
    OverridePunch,
    LateIn,
    EarlyOut,
}

impl ViolationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::ClockSkew => "clock_skew",
            ViolationKind::OverridePunch => "override",
            ViolationKind::LateIn => "late_in",
            ViolationKind::EarlyOut => "early_out",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "clock_skew" => Some(ViolationKind::ClockSkew),
            "override" => Some(ViolationKind::OverridePunch),
            "late_in" => Some(ViolationKind::LateIn),
            "early_out" => Some(ViolationKind::EarlyOut),
            _ => None,
        }
    }

    /// Serialize a flag set into the `punches.flags` column (`a,b,c`).
    pub fn join(flags: &BTreeSet<ViolationKind>) -> String {
        flags.iter().map(|f| f.code()).collect::<Vec<_>>().join(",")
    }

    /// Parse the `punches.flags` column; unknown codes are skipped.
    pub fn split(s: &str) -> BTreeSet<ViolationKind> {
        s.split(',').filter_map(Self::from_code).collect()
    }
}

/// A check-in or check-out. Append-only once written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PunchEvent {
    pub id: i64,
    pub user: String,
    pub kind: PunchKind,
    /// Trusted (server-corrected) local time; the ordering key.
    pub server_ts: NaiveDateTime,
    /// Raw device time at the moment of the punch, kept for audit.
    pub device_ts: Option<NaiveDateTime>,
    pub is_suspicious: bool,
    pub flags: BTreeSet<ViolationKind>,
}

impl PunchEvent {
    /// Event stamped with trusted time only, no device reading.
    pub fn new(user: &str, kind: PunchKind, server_ts: NaiveDateTime) -> Self {
        Self {
            id: 0,
            user: user.to_string(),
            kind,
            server_ts,
            device_ts: None,
            is_suspicious: false,
            flags: BTreeSet::new(),
        }
    }

    /// Local calendar day the event belongs to.
    pub fn date(&self) -> NaiveDate {
        self.server_ts.date()
    }

    pub fn minute_of_day(&self) -> i32 {
        (self.server_ts.hour() * 60 + self.server_ts.minute()) as i32
    }

    /// Minutes since `anchor`'s midnight.
    ///
    /// Events dated after the anchor land past 1440, which is how an OUT
    /// logged after midnight lines up with an overnight segment.
    pub fn minutes_from(&self, anchor: NaiveDate) -> i32 {
        let days = (self.date() - anchor).num_days() as i32;
        days * 1440 + self.minute_of_day()
    }

    pub fn time_str(&self) -> String {
        self.server_ts.format("%H:%M").to_string()
    }
}
