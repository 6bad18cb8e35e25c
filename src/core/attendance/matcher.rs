use crate::config::PunchWindows;
use crate::models::punch::PunchEvent;
use crate::models::punch_kind::PunchKind;
use crate::models::shift::ShiftSegment;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashSet;

/// A punch assigned to a segment, with its minute offset from the day anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPunch {
    pub event: PunchEvent,
    pub minute: i32,
}

/// A segment paired with at most one IN and one OUT. Recomputed on every
/// evaluation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedShift {
    pub index: usize,
    pub segment: ShiftSegment,
    pub punch_in: Option<MatchedPunch>,
    pub punch_out: Option<MatchedPunch>,
}

impl MatchedShift {
    pub fn unmatched(index: usize, segment: ShiftSegment) -> Self {
        Self {
            index,
            segment,
            punch_in: None,
            punch_out: None,
        }
    }

    pub fn in_minute(&self) -> Option<i32> {
        self.punch_in.as_ref().map(|p| p.minute)
    }

    pub fn out_minute(&self) -> Option<i32> {
        self.punch_out.as_ref().map(|p| p.minute)
    }
}

/// True when minute `m` of the anchor day belongs to the tail of an
/// overnight segment: well before its start and no later than the
/// missed-out cutoff after its end.
pub fn is_early_morning(segment: &ShiftSegment, m: i32, windows: &PunchWindows) -> bool {
    segment.is_overnight()
        && m < 1440
        && m < segment.start_minute() - windows.early_morning_wrap
        && m < segment.end.minutes() as i32 + windows.missed_out_cutoff
}

/// Early-morning minutes of the anchor day count as the next day for a
/// segment that crosses midnight.
pub fn wrap(segment: &ShiftSegment, m: i32, windows: &PunchWindows) -> i32 {
    if is_early_morning(segment, m, windows) { m + 1440 } else { m }
}

/// Assign punches to `segments` of the day starting at `anchor`.
///
/// Logs must be sorted by `server_ts`. Minutes are counted from `anchor`'s
/// midnight, so an event dated the next day sits past 1440 and lines up
/// with the wrapped end of an overnight segment. Ordering between an OUT
/// and its IN uses the timestamps themselves.
///
/// Greedy, two passes, no backtracking:
/// - IN: per segment in order, the first unused IN within
///   `[start - pre_window, end - margin]`.
/// - OUT: per segment in order, the first unused OUT after the segment's IN
///   (or at least `out_min_after_start` past the start when it has none),
///   and before the next segment's IN when that one is matched.
///
/// Events that fit nowhere are left out.
pub fn match_shifts(
    logs: &[PunchEvent],
    segments: &[ShiftSegment],
    anchor: NaiveDate,
    windows: &PunchWindows,
) -> Vec<MatchedShift> {
    let minutes: Vec<i32> = logs.iter().map(|e| e.minutes_from(anchor)).collect();
    let mut used = vec![false; logs.len()];

    let mut out: Vec<MatchedShift> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| MatchedShift::unmatched(i, *s))
        .collect();

    // ---- IN pass ----
    for shift in out.iter_mut() {
        let lo = shift.segment.start_minute() - windows.match_pre_window;
        let hi = shift.segment.end_minute() - windows.match_in_end_margin;

        let hit = logs.iter().enumerate().find(|(i, e)| {
            let m = wrap(&shift.segment, minutes[*i], windows);
            !used[*i] && e.kind == PunchKind::In && (lo..=hi).contains(&m)
        });

        if let Some((i, e)) = hit {
            used[i] = true;
            shift.punch_in = Some(MatchedPunch {
                event: e.clone(),
                minute: wrap(&shift.segment, minutes[i], windows),
            });
        }
    }

    // ---- OUT pass ----
    let next_in: Vec<Option<NaiveDateTime>> = (0..out.len())
        .map(|i| {
            out.get(i + 1)
                .and_then(|s| s.punch_in.as_ref())
                .map(|p| p.event.server_ts)
        })
        .collect();

    for (idx, shift) in out.iter_mut().enumerate() {
        let in_ts = shift.punch_in.as_ref().map(|p| p.event.server_ts);
        let earliest = shift.segment.start_minute() + windows.out_min_after_start;
        let before = next_in[idx];

        let hit = logs.iter().enumerate().find(|(i, e)| {
            let after_in = match in_ts {
                Some(ts) => e.server_ts > ts,
                None => wrap(&shift.segment, minutes[*i], windows) >= earliest,
            };
            !used[*i]
                && e.kind == PunchKind::Out
                && after_in
                && before.is_none_or(|b| e.server_ts < b)
        });

        if let Some((i, e)) = hit {
            used[i] = true;
            shift.punch_out = Some(MatchedPunch {
                event: e.clone(),
                minute: wrap(&shift.segment, minutes[i], windows),
            });
        }
    }

    out
}

/// Punches of the day after `anchor` that the anchor day's segments may
/// still claim.
///
/// Only an overnight segment reaches past midnight, and only until the
/// missed-out cutoff after its end. Without an overnight segment nothing
/// is carried.
pub fn carried_over(
    next_day_logs: &[PunchEvent],
    segments: &[ShiftSegment],
    anchor: NaiveDate,
    windows: &PunchWindows,
) -> Vec<PunchEvent> {
    let Some(cap) = segments
        .iter()
        .filter(|s| s.is_overnight())
        .map(|s| s.end_minute() + windows.missed_out_cutoff)
        .max()
    else {
        return Vec::new();
    };

    next_day_logs
        .iter()
        .filter(|e| e.minutes_from(anchor) < cap)
        .cloned()
        .collect()
}

/// Match yesterday's and today's segments, in that order.
///
/// Both log slices must be sorted by `server_ts`. Yesterday sees its own
/// punches plus what [`carried_over`] lets through from today; today is
/// matched over the punches yesterday left unclaimed.
pub fn match_days(
    yesterday_logs: &[PunchEvent],
    today_logs: &[PunchEvent],
    yesterday_segments: &[ShiftSegment],
    today_segments: &[ShiftSegment],
    today: NaiveDate,
    windows: &PunchWindows,
) -> (Vec<MatchedShift>, Vec<MatchedShift>) {
    let yesterday = today.pred_opt().unwrap_or(today);

    let mut carry = yesterday_logs.to_vec();
    carry.extend(carried_over(today_logs, yesterday_segments, yesterday, windows));
    let matched_yesterday = match_shifts(&carry, yesterday_segments, yesterday, windows);

    let claimed: HashSet<i64> = matched_yesterday
        .iter()
        .flat_map(|m| [m.punch_in.as_ref(), m.punch_out.as_ref()])
        .flatten()
        .map(|p| p.event.id)
        .collect();
    let unclaimed: Vec<PunchEvent> = today_logs
        .iter()
        .filter(|e| !claimed.contains(&e.id))
        .cloned()
        .collect();
    let matched_today = match_shifts(&unclaimed, today_segments, today, windows);

    (matched_yesterday, matched_today)
}
