use super::shift::ShiftSegment;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Which class of dates a recurring record applies to, derived from its note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayType {
    /// Every day that is neither a Friday nor a holiday.
    Regular,
    Friday,
    Holiday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScheduleScope {
    /// Applies to exactly one date.
    Pinned { date: NaiveDate },
    /// Applies to a class of dates, optionally bounded.
    Recurring {
        valid_from: Option<NaiveDate>,
        valid_to: Option<NaiveDate>,
    },
}

/// A published schedule row. Never mutated: superseded by a newer record
/// or removed by deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub id: i64,
    pub user: String,
    pub scope: ScheduleScope,
    /// Location / free-text note ("Off", "Friday", "9-1 & 5-9", ...).
    pub note: String,
    /// Structured segments; when empty the note is parsed instead.
    pub segments: Vec<ShiftSegment>,
    pub created_at: NaiveDateTime,
}

const HOLIDAY_WORDS: &[&str] = &["holiday", "عطلة", "إجازة", "اجازة"];
const FRIDAY_WORDS: &[&str] = &["friday", "fri", "الجمعة", "جمعة"];

fn has_word(note: &str, words: &[&str]) -> bool {
    let lower = note.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|tok| words.contains(&tok))
}

impl ScheduleRecord {
    pub fn pinned_date(&self) -> Option<NaiveDate> {
        match self.scope {
            ScheduleScope::Pinned { date } => Some(date),
            ScheduleScope::Recurring { .. } => None,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_date().is_some()
    }

    pub fn valid_from(&self) -> Option<NaiveDate> {
        match self.scope {
            ScheduleScope::Recurring { valid_from, .. } => valid_from,
            ScheduleScope::Pinned { .. } => None,
        }
    }

    /// A Holiday tag wins over a Friday tag on the same record.
    pub fn day_type(&self) -> DayType {
        if has_word(&self.note, HOLIDAY_WORDS) {
            DayType::Holiday
        } else if has_word(&self.note, FRIDAY_WORDS) {
            DayType::Friday
        } else {
            DayType::Regular
        }
    }

    /// True when the note marks the day as not worked ("Off", "Holiday", ...).
    pub fn marks_off(&self) -> bool {
        has_word(&self.note, &["off", "leave", "راحة"]) || has_word(&self.note, HOLIDAY_WORDS)
    }

    /// `[valid_from, valid_to]` containment; open bounds always pass.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match self.scope {
            ScheduleScope::Pinned { date: d } => d == date,
            ScheduleScope::Recurring {
                valid_from,
                valid_to,
            } => valid_from.is_none_or(|f| f <= date) && valid_to.is_none_or(|t| date <= t),
        }
    }
}
