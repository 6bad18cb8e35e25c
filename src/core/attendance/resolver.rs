use super::parser::split_segments;
use crate::models::schedule::{DayType, ScheduleRecord};
use crate::models::shift::ShiftSegment;
use chrono::{Datelike, NaiveDate, Weekday};
use std::cmp::Ordering;
use tracing::debug;

/// Which day-type(s) of recurring record may apply on `date`.
fn day_type_for(date: NaiveDate, holidays: &[NaiveDate]) -> DayType {
    if holidays.contains(&date) {
        DayType::Holiday
    } else if date.weekday() == Weekday::Fri {
        DayType::Friday
    } else {
        DayType::Regular
    }
}

/// Segments of a single record: structured list first, else the note.
pub fn record_segments(record: &ScheduleRecord) -> Vec<ShiftSegment> {
    if !record.segments.is_empty() {
        record.segments.clone()
    } else {
        split_segments(&record.note)
    }
}

/// Bounded records outrank open-ended ones, then newest `created_at`,
/// then highest id.
fn rank(a: &ScheduleRecord, b: &ScheduleRecord) -> Ordering {
    b.valid_from()
        .is_some()
        .cmp(&a.valid_from().is_some())
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Pick the applicable record for `date`, if any.
pub fn applicable_record<'a>(
    records: &'a [ScheduleRecord],
    date: NaiveDate,
    holidays: &[NaiveDate],
) -> Option<&'a ScheduleRecord> {
    // 1) A pinned record for the date wins outright
    if let Some(pinned) = records
        .iter()
        .filter(|r| r.pinned_date() == Some(date))
        .min_by(|a, b| rank(a, b))
    {
        return Some(pinned);
    }

    // 2) Recurring candidates: date within bounds and matching day type
    let wanted = day_type_for(date, holidays);
    let pick = |ty: DayType| {
        records
            .iter()
            .filter(|r| !r.is_pinned() && r.covers(date) && r.day_type() == ty)
            .min_by(|a, b| rank(a, b))
    };

    let found = match wanted {
        // a holiday with no holiday rule falls back to the weekday rules
        DayType::Holiday => pick(DayType::Holiday).or_else(|| {
            if date.weekday() == Weekday::Fri {
                pick(DayType::Friday)
            } else {
                pick(DayType::Regular)
            }
        }),
        other => pick(other),
    };

    debug!(%date, record = ?found.map(|r| r.id), "resolved schedule record");
    found
}

/// Segments scheduled for `date`; empty means OFF.
pub fn resolve(records: &[ScheduleRecord], date: NaiveDate) -> Vec<ShiftSegment> {
    resolve_with_holidays(records, date, &[])
}

pub fn resolve_with_holidays(
    records: &[ScheduleRecord],
    date: NaiveDate,
    holidays: &[NaiveDate],
) -> Vec<ShiftSegment> {
    match applicable_record(records, date, holidays) {
        Some(r) if r.is_pinned() && r.marks_off() => Vec::new(),
        Some(r) => record_segments(r),
        None => Vec::new(),
    }
}
