//! Punch state machine: a pure function from the current time and the
//! day's matched shifts to the one state the attendance screen shows.

use super::matcher::{MatchedShift, is_early_morning};
use crate::config::PunchWindows;
use crate::models::punch::PunchEvent;
use crate::models::punch_kind::PunchKind;
use crate::models::state::{PunchState, ShiftDay, StateReport};
use crate::utils::formatting::mins2readable;
use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

const DAY: i32 = 1440;

/// Everything one evaluation depends on.
#[derive(Debug, Clone, Copy)]
pub struct StateInput<'a> {
    /// Trusted local time; its date is "today".
    pub now: NaiveDateTime,
    /// Today's segments matched against today's logs.
    pub today: &'a [MatchedShift],
    /// Today's raw punches, sorted.
    pub today_logs: &'a [PunchEvent],
    /// Yesterday's segments matched against yesterday's and today's logs.
    pub yesterday: &'a [MatchedShift],
    pub override_active: bool,
}

fn label(shift: &MatchedShift) -> String {
    format!("Shift {}: {}", shift.index + 1, shift.segment)
}

fn in_about(minutes: i32) -> String {
    mins2readable(minutes as i64)
}

/// Compute the state. When the override is active and the resulting punch
/// would be refused without it, the report says so in `relies_on_override`.
pub fn evaluate(input: &StateInput<'_>, windows: &PunchWindows) -> StateReport {
    let mut report = evaluate_with(input, windows, input.override_active);

    if input.override_active && report.can_punch {
        let plain = evaluate_with(input, windows, false);
        report.relies_on_override = !plain.can_punch;
    }

    debug!(
        now = %input.now,
        state = %report.state,
        can_punch = report.can_punch,
        "punch state evaluated"
    );
    report
}

fn evaluate_with(input: &StateInput<'_>, w: &PunchWindows, ov: bool) -> StateReport {
    let now_min = (input.now.hour() * 60 + input.now.minute()) as i32;

    // 1) Yesterday's overnight shift still open
    if let Some(report) = overnight_carry(input.yesterday, now_min + DAY, w, ov) {
        return report;
    }

    // 2) A lone OUT today closes yesterday's overnight shift
    let ins = input.today_logs.iter().filter(|e| e.kind == PunchKind::In).count();
    let mut outs = input.today_logs.iter().filter(|e| e.kind == PunchKind::Out);
    if let (0, Some(out), None) = (ins, outs.next(), outs.next()) {
        let out_min = out.minute_of_day();
        if now_min < out_min + w.completed_display {
            let mut r = StateReport::new(
                PunchState::Completed,
                "Shift completed",
                format!("Checked out at {}", out.time_str()),
            );
            r.shift_day = ShiftDay::Yesterday;
            return r;
        }
    }

    // 3) Nothing scheduled
    if input.today.is_empty() {
        return StateReport::new(PunchState::Off, "Day off", "No shift scheduled today");
    }

    // 4) Walk today's segments in order. Early-morning time only belongs
    //    to today's overnight segment when yesterday had none of its own.
    let yesterday_overnight = input.yesterday.iter().any(|s| s.segment.is_overnight());
    let count = input.today.len();
    for (i, shift) in input.today.iter().enumerate() {
        let has_next = i + 1 < count;
        let s = shift.segment.start_minute();
        let e = shift.segment.end_minute();
        let mut n = now_min;
        if !yesterday_overnight && is_early_morning(&shift.segment, n, w) {
            n += DAY;
        }

        let outcome = match (shift.in_minute(), shift.out_minute()) {
            (Some(_), Some(out_min)) => {
                if n < out_min + w.completed_display {
                    Some(
                        StateReport::new(
                            PunchState::Completed,
                            "Shift completed",
                            format!("{} · checked out at {}", label(shift), fmt_minute(out_min)),
                        )
                        .at_shift(i, ShiftDay::Today),
                    )
                } else {
                    None
                }
            }
            (Some(_), None) => on_duty(shift, n, e, w, ov, ShiftDay::Today),
            (None, _) => not_started(shift, i, n, s, e, w, ov),
        };

        match outcome {
            Some(report) => return report,
            None if has_next => continue,
            None => {
                return StateReport::new(
                    PunchState::NextShift,
                    "All shifts done",
                    "No more shifts today",
                );
            }
        }
    }

    StateReport::new(PunchState::Off, "Day off", "No shift scheduled today")
}

/// Open overnight shift from yesterday: IN matched, OUT not yet.
fn overnight_carry(
    yesterday: &[MatchedShift],
    n: i32,
    w: &PunchWindows,
    ov: bool,
) -> Option<StateReport> {
    let shift = yesterday.iter().rev().find(|s| {
        s.segment.is_overnight() && s.punch_in.is_some() && s.punch_out.is_none()
    })?;
    on_duty(shift, n, shift.segment.end_minute(), w, ov, ShiftDay::Yesterday)
}

/// IN present, OUT absent. `None` once the missed-out window has passed.
fn on_duty(
    shift: &MatchedShift,
    n: i32,
    e: i32,
    w: &PunchWindows,
    ov: bool,
    day: ShiftDay,
) -> Option<StateReport> {
    let report = if n < e - w.out_lock_margin && !ov {
        StateReport::new(
            PunchState::Locked,
            "On duty",
            format!(
                "{} · check-out opens in {}",
                label(shift),
                in_about(e - w.out_lock_margin - n)
            ),
        )
    } else if n < e + w.out_grace {
        StateReport::new(PunchState::ReadyOut, "Ready to check out", label(shift))
    } else if n < e + w.missed_out_cutoff {
        StateReport::new(
            PunchState::MissedOut,
            "Check-out missed",
            format!("{} · contact your supervisor", label(shift)),
        )
    } else {
        return None;
    };
    Some(report.at_shift(shift.index, day))
}

/// IN absent. `None` once the absence window has passed.
fn not_started(
    shift: &MatchedShift,
    i: usize,
    n: i32,
    s: i32,
    e: i32,
    w: &PunchWindows,
    ov: bool,
) -> Option<StateReport> {
    let ready = || StateReport::new(PunchState::ReadyIn, "Ready to check in", label(shift));

    let report = if n < s - w.in_open_before {
        if ov {
            ready()
        } else if i == 0 {
            StateReport::new(
                PunchState::Locked,
                "Too early",
                format!(
                    "{} · check-in opens in {}",
                    label(shift),
                    in_about(s - w.in_open_before - n)
                ),
            )
        } else {
            StateReport::new(
                PunchState::Waiting,
                "On break",
                format!(
                    "{} · next check-in in {}",
                    label(shift),
                    in_about(s - w.in_open_before - n)
                ),
            )
        }
    } else if n <= e {
        ready()
    } else if n <= e + w.absent_after_end {
        if ov {
            ready()
        } else {
            StateReport::new(
                PunchState::Absent,
                "Absent",
                format!("{} · no check-in recorded", label(shift)),
            )
        }
    } else {
        return None;
    };
    Some(report.at_shift(i, ShiftDay::Today))
}

fn fmt_minute(m: i32) -> String {
    let m = m.rem_euclid(DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}
