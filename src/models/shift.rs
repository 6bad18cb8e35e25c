use serde::{Serialize, Serializer};
use std::fmt;

pub const MINUTES_PER_DAY: u16 = 1440;

/// Minutes since midnight, `0..=1440`.
///
/// `1440` is the end-of-day sentinel ("24:00") and is distinct from `0`.
/// It only appears as the end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const NOON: TimeOfDay = TimeOfDay(720);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute > 0) {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Strict `HH:MM` parsing (24-hour, `24:00` allowed).
    pub fn parse_hhmm(s: &str) -> Option<Self> {
        let (h, m) = s.trim().split_once(':')?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return None;
        }
        Self::from_hm(h.parse().ok()?, m.parse().ok()?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One contiguous scheduled work interval.
///
/// `end < start` means the segment crosses midnight into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftSegment {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ShiftSegment {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    pub fn start_minute(&self) -> i32 {
        self.start.minutes() as i32
    }

    /// End in minutes relative to the start day's midnight (`+1440` when overnight).
    pub fn end_minute(&self) -> i32 {
        let end = self.end.minutes() as i32;
        if self.is_overnight() {
            end + MINUTES_PER_DAY as i32
        } else {
            end
        }
    }

    /// Parse a strict `HH:MM-HH:MM` pair, as stored in structured schedule rows.
    pub fn parse_pair(s: &str) -> Option<Self> {
        let (a, b) = s.split_once('-')?;
        Some(Self::new(TimeOfDay::parse_hhmm(a)?, TimeOfDay::parse_hhmm(b)?))
    }

    /// Render a segment list as `HH:MM-HH:MM,HH:MM-HH:MM` (DB column format).
    pub fn join(segments: &[ShiftSegment]) -> String {
        segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn split_stored(s: &str) -> Vec<ShiftSegment> {
        s.split(',')
            .filter(|p| !p.trim().is_empty())
            .filter_map(Self::parse_pair)
            .collect()
    }
}

impl fmt::Display for ShiftSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
