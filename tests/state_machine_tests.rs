use chrono::Duration;
use rshiftclock::core::attendance::{MatchedShift, StateInput, evaluate, match_days};
use rshiftclock::models::punch::PunchEvent;
use rshiftclock::models::shift::ShiftSegment;
use rshiftclock::models::state::{PunchState, ShiftDay, StateReport};

mod common;
use common::{punch_in, punch_out, segs, ts, windows};

/// Everything about one user's two relevant days.
struct Day {
    today: Vec<ShiftSegment>,
    today_logs: Vec<PunchEvent>,
    yesterday: Vec<ShiftSegment>,
    yesterday_logs: Vec<PunchEvent>,
}

impl Day {
    fn plain(today: &[&str], logs: Vec<PunchEvent>) -> Self {
        Self {
            today: segs(today),
            today_logs: logs,
            yesterday: Vec::new(),
            yesterday_logs: Vec::new(),
        }
    }

    fn matched(&self, now: &str) -> (Vec<MatchedShift>, Vec<MatchedShift>) {
        match_days(
            &self.yesterday_logs,
            &self.today_logs,
            &self.yesterday,
            &self.today,
            ts(now).date(),
            &windows(),
        )
    }

    fn at(&self, now: &str, override_active: bool) -> StateReport {
        let (matched_yesterday, matched_today) = self.matched(now);

        evaluate(
            &StateInput {
                now: ts(now),
                today: &matched_today,
                today_logs: &self.today_logs,
                yesterday: &matched_yesterday,
                override_active,
            },
            &windows(),
        )
    }

    fn state(&self, now: &str) -> PunchState {
        self.at(now, false).state
    }
}

#[test]
fn test_nothing_scheduled_is_off() {
    let day = Day::plain(&[], vec![]);
    let r = day.at("2025-06-02 10:00", false);
    assert_eq!(r.state, PunchState::Off);
    assert!(!r.can_punch);
}

#[test]
fn test_before_and_during_shift_without_in() {
    let day = Day::plain(&["09:00-17:00"], vec![]);
    assert_eq!(day.state("2025-06-02 07:30"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 08:00"), PunchState::ReadyIn);
    assert_eq!(day.state("2025-06-02 12:00"), PunchState::ReadyIn);
    assert_eq!(day.state("2025-06-02 17:00"), PunchState::ReadyIn);
    assert_eq!(day.state("2025-06-02 17:30"), PunchState::Absent);
    assert_eq!(day.state("2025-06-02 18:01"), PunchState::NextShift);
}

#[test]
fn test_on_duty_lock_then_ready_out_then_missed() {
    let day = Day::plain(&["09:00-17:00"], vec![punch_in(1, "2025-06-02 08:58")]);
    assert_eq!(day.state("2025-06-02 12:00"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 16:44"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 16:45"), PunchState::ReadyOut);
    assert_eq!(day.state("2025-06-02 17:59"), PunchState::ReadyOut);
    assert_eq!(day.state("2025-06-02 18:00"), PunchState::MissedOut);
    assert_eq!(day.state("2025-06-02 18:30"), PunchState::NextShift);
}

#[test]
fn test_completed_display_window() {
    let day = Day::plain(
        &["09:00-17:00"],
        vec![punch_in(1, "2025-06-02 08:58"), punch_out(2, "2025-06-02 17:02")],
    );
    let r = day.at("2025-06-02 17:30", false);
    assert_eq!(r.state, PunchState::Completed);
    assert_eq!(r.active_shift, Some(0));
    assert_eq!(day.state("2025-06-02 18:10"), PunchState::NextShift);
}

#[test]
fn test_split_shift_break_is_waiting() {
    let day = Day::plain(
        &["09:00-13:00", "17:00-21:00"],
        vec![punch_in(1, "2025-06-02 08:58"), punch_out(2, "2025-06-02 13:01")],
    );
    assert_eq!(day.state("2025-06-02 13:30"), PunchState::Completed);
    let r = day.at("2025-06-02 14:30", false);
    assert_eq!(r.state, PunchState::Waiting);
    assert_eq!(r.active_shift, Some(1));
    assert_eq!(day.state("2025-06-02 16:10"), PunchState::ReadyIn);
}

#[test]
fn test_missed_first_segment_moves_on() {
    let day = Day::plain(&["09:00-13:00", "17:00-21:00"], vec![]);
    assert_eq!(day.state("2025-06-02 13:30"), PunchState::Absent);
    assert_eq!(day.state("2025-06-02 14:30"), PunchState::Waiting);
}

#[test]
fn test_messages_name_the_shift() {
    let day = Day::plain(&["09:00-13:00", "17:00-21:00"], vec![]);
    let r = day.at("2025-06-02 16:30", false);
    assert_eq!(r.state, PunchState::ReadyIn);
    assert!(r.secondary.contains("Shift 2: 17:00-21:00"));
}

#[test]
fn test_full_day_walkthrough() {
    let mut day = Day::plain(&["08:00-16:00"], vec![]);
    assert_eq!(day.state("2025-06-02 07:55"), PunchState::ReadyIn);

    day.today_logs.push(punch_in(1, "2025-06-02 07:55"));
    assert_eq!(day.state("2025-06-02 08:00"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 15:40"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 15:50"), PunchState::ReadyOut);

    day.today_logs.push(punch_out(2, "2025-06-02 16:01"));
    assert_eq!(day.state("2025-06-02 16:05"), PunchState::Completed);
}

#[test]
fn test_overnight_segment_early_morning_with_empty_yesterday() {
    let day = Day::plain(&["22:00-06:00"], vec![]);
    assert_eq!(day.state("2025-06-02 01:30"), PunchState::ReadyIn);
    assert_eq!(day.state("2025-06-02 12:00"), PunchState::Locked);
    assert_eq!(day.state("2025-06-02 21:00"), PunchState::ReadyIn);
}

#[test]
fn test_yesterday_open_overnight_shift_carries_over() {
    let day = Day {
        today: segs(&["22:00-06:00"]),
        today_logs: vec![],
        yesterday: segs(&["22:00-06:00"]),
        yesterday_logs: vec![punch_in(1, "2025-06-01 21:58")],
    };

    let r = day.at("2025-06-02 03:00", false);
    assert_eq!(r.state, PunchState::Locked);
    assert_eq!(r.shift_day, ShiftDay::Yesterday);

    let r = day.at("2025-06-02 05:50", false);
    assert_eq!(r.state, PunchState::ReadyOut);
    assert_eq!(r.shift_day, ShiftDay::Yesterday);
}

#[test]
fn test_out_after_midnight_completes_yesterday() {
    let day = Day {
        today: segs(&["22:00-06:00"]),
        today_logs: vec![punch_out(2, "2025-06-02 06:02")],
        yesterday: segs(&["22:00-06:00"]),
        yesterday_logs: vec![punch_in(1, "2025-06-01 21:58")],
    };

    let r = day.at("2025-06-02 06:30", false);
    assert_eq!(r.state, PunchState::Completed);
    assert_eq!(r.shift_day, ShiftDay::Yesterday);

    // later that day tonight's shift is ahead
    assert_eq!(day.state("2025-06-02 12:00"), PunchState::Locked);
}

#[test]
fn test_override_unlocks_and_is_reported() {
    let on_duty = Day::plain(&["09:00-17:00"], vec![punch_in(1, "2025-06-02 08:58")]);
    let r = on_duty.at("2025-06-02 12:00", true);
    assert_eq!(r.state, PunchState::ReadyOut);
    assert!(r.relies_on_override);

    let idle = Day::plain(&["09:00-17:00"], vec![]);
    let early = idle.at("2025-06-02 07:00", true);
    assert_eq!(early.state, PunchState::ReadyIn);
    assert!(early.relies_on_override);

    let absent = idle.at("2025-06-02 17:30", true);
    assert_eq!(absent.state, PunchState::ReadyIn);
    assert!(absent.relies_on_override);

    // already allowed: the grant is not needed
    let normal = idle.at("2025-06-02 08:30", true);
    assert_eq!(normal.state, PunchState::ReadyIn);
    assert!(!normal.relies_on_override);
}

#[test]
fn test_override_does_not_reopen_finished_day() {
    let day = Day::plain(&["09:00-17:00"], vec![]);
    let r = day.at("2025-06-02 20:00", true);
    assert_eq!(r.state, PunchState::NextShift);
    assert!(!r.can_punch);
}

#[test]
fn test_day_shift_yesterday_leaves_today_punches_alone() {
    let day = Day {
        today: segs(&["09:00-17:00"]),
        today_logs: vec![punch_in(1, "2025-06-02 08:55"), punch_out(2, "2025-06-02 17:05")],
        yesterday: segs(&["09:00-17:00"]),
        yesterday_logs: vec![],
    };

    let r = day.at("2025-06-02 17:10", false);
    assert_eq!(r.state, PunchState::Completed);
    assert!(!r.can_punch);

    let (yesterday, today) = day.matched("2025-06-02 17:10");
    assert!(yesterday[0].punch_in.is_none());
    assert!(yesterday[0].punch_out.is_none());
    assert_eq!(today[0].punch_out.as_ref().map(|p| p.event.id), Some(2));
}

#[test]
fn test_open_day_shift_yesterday_does_not_take_today_out() {
    let day = Day {
        today: segs(&["09:00-17:00"]),
        today_logs: vec![punch_in(2, "2025-06-02 08:55"), punch_out(3, "2025-06-02 17:05")],
        yesterday: segs(&["09:00-17:00"]),
        yesterday_logs: vec![punch_in(1, "2025-06-01 08:57")],
    };

    let (yesterday, today) = day.matched("2025-06-02 17:10");
    assert!(yesterday[0].punch_out.is_none());
    assert_eq!(today[0].punch_out.as_ref().map(|p| p.event.id), Some(3));
    assert_eq!(day.state("2025-06-02 17:10"), PunchState::Completed);
}

#[test]
fn test_second_in_inside_the_shift_is_ignored() {
    let day = Day::plain(
        &["08:00-16:00"],
        vec![punch_in(1, "2025-06-02 07:55"), punch_in(2, "2025-06-02 13:58")],
    );
    let (_, today) = day.matched("2025-06-02 14:00");
    assert_eq!(today[0].punch_in.as_ref().map(|p| p.event.id), Some(1));
    assert_eq!(day.state("2025-06-02 14:00"), PunchState::Locked);
}

/// Logs of one pattern dated `on`, ids starting at `first_id`.
fn pattern(kind: &str, on: &str, first_id: i64) -> Vec<PunchEvent> {
    let at = |hm: &str| format!("{on} {hm}");
    match kind {
        "in" => vec![punch_in(first_id, &at("08:55"))],
        "in+out" => vec![punch_in(first_id, &at("08:55")), punch_out(first_id + 1, &at("13:02"))],
        "out" => vec![punch_out(first_id, &at("13:02"))],
        _ => vec![],
    }
}

#[test]
fn test_every_minute_yields_one_consistent_state() {
    let schedules: &[&[&str]] = &[&[], &["09:00-17:00"], &["09:00-13:00", "17:00-21:00"], &["22:00-06:00"]];
    let kinds = ["none", "in", "in+out", "out"];

    let mut days = Vec::new();
    for schedule in schedules {
        for kind in kinds {
            // empty yesterday
            days.push(Day::plain(schedule, pattern(kind, "2025-06-02", 10)));
            // same schedule and same punches the day before
            days.push(Day {
                today: segs(schedule),
                today_logs: pattern(kind, "2025-06-02", 10),
                yesterday: segs(schedule),
                yesterday_logs: pattern(kind, "2025-06-01", 1),
            });
        }
    }

    let start = ts("2025-06-02 00:00");
    for day in &days {
        for step in 0..(24 * 12) {
            let now = (start + Duration::minutes(step * 5)).format("%Y-%m-%d %H:%M").to_string();

            let (yesterday, today) = day.matched(&now);
            let claimed = |shifts: &[MatchedShift]| -> Vec<i64> {
                shifts
                    .iter()
                    .flat_map(|m| [m.punch_in.as_ref(), m.punch_out.as_ref()])
                    .flatten()
                    .map(|p| p.event.id)
                    .collect()
            };
            let yesterday_ids = claimed(&yesterday);
            for id in claimed(&today) {
                assert!(!yesterday_ids.contains(&id), "punch {id} matched on both days at {now}");
            }

            for ov in [false, true] {
                let first = day.at(&now, ov);
                let again = day.at(&now, ov);
                assert_eq!(first, again, "evaluation not repeatable at {now}");
                assert_eq!(
                    first.can_punch,
                    matches!(first.state, PunchState::ReadyIn | PunchState::ReadyOut),
                    "can_punch disagrees with {} at {now}",
                    first.state
                );
                if first.relies_on_override {
                    assert!(ov && first.can_punch);
                }
            }
        }
    }
}
