use rshiftclock::core::attendance::{carried_over, match_shifts};

mod common;
use common::{date, punch_in, punch_out, segs, windows};

#[test]
fn test_single_shift_in_and_out() {
    let logs = vec![punch_in(1, "2025-06-02 08:55"), punch_out(2, "2025-06-02 17:02")];
    let m = match_shifts(&logs, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());

    assert_eq!(m.len(), 1);
    assert_eq!(m[0].in_minute(), Some(535));
    assert_eq!(m[0].out_minute(), Some(1022));
}

#[test]
fn test_in_outside_pre_window_is_ignored() {
    let logs = vec![punch_in(1, "2025-06-02 06:30")];
    let m = match_shifts(&logs, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());
    assert!(m[0].punch_in.is_none());
}

#[test]
fn test_in_at_the_very_end_is_not_matched() {
    // IN window closes one minute before the end
    let logs = vec![punch_in(1, "2025-06-02 17:00")];
    let m = match_shifts(&logs, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());
    assert!(m[0].punch_in.is_none());
}

#[test]
fn test_split_shift_assigns_each_pair() {
    let logs = vec![
        punch_in(1, "2025-06-02 08:58"),
        punch_out(2, "2025-06-02 13:01"),
        punch_in(3, "2025-06-02 16:55"),
        punch_out(4, "2025-06-02 21:03"),
    ];
    let m = match_shifts(
        &logs,
        &segs(&["09:00-13:00", "17:00-21:00"]),
        date("2025-06-02"),
        &windows(),
    );

    assert_eq!(m[0].punch_in.as_ref().map(|p| p.event.id), Some(1));
    assert_eq!(m[0].punch_out.as_ref().map(|p| p.event.id), Some(2));
    assert_eq!(m[1].punch_in.as_ref().map(|p| p.event.id), Some(3));
    assert_eq!(m[1].punch_out.as_ref().map(|p| p.event.id), Some(4));
}

#[test]
fn test_out_cannot_cross_next_segment_in() {
    let logs = vec![
        punch_in(1, "2025-06-02 09:00"),
        punch_in(2, "2025-06-02 17:00"),
        punch_out(3, "2025-06-02 21:00"),
    ];
    let m = match_shifts(
        &logs,
        &segs(&["09:00-13:00", "17:00-21:00"]),
        date("2025-06-02"),
        &windows(),
    );

    assert!(m[0].punch_out.is_none());
    assert_eq!(m[1].punch_out.as_ref().map(|p| p.event.id), Some(3));
}

#[test]
fn test_out_closes_first_segment_when_next_has_no_in() {
    let logs = vec![punch_in(1, "2025-06-02 09:00"), punch_out(2, "2025-06-02 21:00")];
    let m = match_shifts(
        &logs,
        &segs(&["09:00-13:00", "17:00-21:00"]),
        date("2025-06-02"),
        &windows(),
    );

    assert_eq!(m[0].punch_out.as_ref().map(|p| p.event.id), Some(2));
    assert!(m[1].punch_in.is_none());
    assert!(m[1].punch_out.is_none());
}

#[test]
fn test_out_without_in_needs_minimum_offset() {
    let early = vec![punch_out(1, "2025-06-02 09:03")];
    let m = match_shifts(&early, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());
    assert!(m[0].punch_out.is_none());

    let later = vec![punch_out(1, "2025-06-02 09:05")];
    let m = match_shifts(&later, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());
    assert!(m[0].punch_out.is_some());
}

#[test]
fn test_each_event_used_once() {
    // 08:58 and 09:01 both fall inside both IN windows
    let logs = vec![punch_in(1, "2025-06-02 08:58"), punch_in(2, "2025-06-02 09:01")];
    let m = match_shifts(
        &logs,
        &segs(&["09:00-13:00", "10:00-14:00"]),
        date("2025-06-02"),
        &windows(),
    );
    assert_eq!(m[0].punch_in.as_ref().map(|p| p.event.id), Some(1));
    assert_eq!(m[1].punch_in.as_ref().map(|p| p.event.id), Some(2));

    // alone, the first segment takes the only IN and the second gets none
    let single = vec![punch_in(1, "2025-06-02 08:58")];
    let m = match_shifts(
        &single,
        &segs(&["09:00-13:00", "10:00-14:00"]),
        date("2025-06-02"),
        &windows(),
    );
    assert_eq!(m[0].punch_in.as_ref().map(|p| p.event.id), Some(1));
    assert!(m[1].punch_in.is_none());
}

#[test]
fn test_only_the_first_in_is_matched() {
    let logs = vec![punch_in(1, "2025-06-02 07:55"), punch_in(2, "2025-06-02 13:58")];
    let m = match_shifts(&logs, &segs(&["08:00-16:00"]), date("2025-06-02"), &windows());
    assert_eq!(m[0].punch_in.as_ref().map(|p| p.event.id), Some(1));
    assert!(m[0].punch_out.is_none());
}

#[test]
fn test_overnight_out_on_next_day() {
    let logs = vec![punch_in(1, "2025-06-02 21:55"), punch_out(2, "2025-06-03 06:05")];
    let m = match_shifts(&logs, &segs(&["22:00-06:00"]), date("2025-06-02"), &windows());

    assert_eq!(m[0].in_minute(), Some(1315));
    assert_eq!(m[0].out_minute(), Some(1440 + 365));
}

#[test]
fn test_early_morning_punch_wraps_into_overnight_segment() {
    let logs = vec![punch_in(1, "2025-06-02 00:10")];
    let m = match_shifts(&logs, &segs(&["22:00-06:00"]), date("2025-06-02"), &windows());
    assert_eq!(m[0].in_minute(), Some(1440 + 10));
}

#[test]
fn test_unscheduled_punches_are_left_out() {
    let logs = vec![punch_in(1, "2025-06-02 08:00")];
    let m = match_shifts(&logs, &[], date("2025-06-02"), &windows());
    assert!(m.is_empty());
}

#[test]
fn test_only_overnight_segments_carry_next_day_punches() {
    let next = vec![punch_out(1, "2025-06-03 05:58"), punch_out(2, "2025-06-03 17:05")];

    let day_shift = carried_over(&next, &segs(&["09:00-17:00"]), date("2025-06-02"), &windows());
    assert!(day_shift.is_empty());

    // 06:00 end plus the 90 minute cutoff
    let night = carried_over(&next, &segs(&["22:00-06:00"]), date("2025-06-02"), &windows());
    assert_eq!(night.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
}
