#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rshiftclock::config::PunchWindows;
use rshiftclock::models::punch::PunchEvent;
use rshiftclock::models::punch_kind::PunchKind;
use rshiftclock::models::schedule::{ScheduleRecord, ScheduleScope};
use rshiftclock::models::shift::ShiftSegment;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsc() -> Command {
    cargo_bin_cmd!("rshiftclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rshiftclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a DB through the CLI (schema + migrations, no config write)
pub fn init_db(db_path: &str) {
    rsc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("timestamp")
}

pub fn seg(s: &str) -> ShiftSegment {
    ShiftSegment::parse_pair(s).expect("segment")
}

pub fn segs(list: &[&str]) -> Vec<ShiftSegment> {
    list.iter().map(|s| seg(s)).collect()
}

pub fn punch_in(id: i64, at: &str) -> PunchEvent {
    let mut ev = PunchEvent::new("alice", PunchKind::In, ts(at));
    ev.id = id;
    ev
}

pub fn punch_out(id: i64, at: &str) -> PunchEvent {
    let mut ev = PunchEvent::new("alice", PunchKind::Out, ts(at));
    ev.id = id;
    ev
}

pub fn windows() -> PunchWindows {
    PunchWindows::default()
}

pub fn recurring(id: i64, note: &str, from: Option<&str>, to: Option<&str>, created: &str) -> ScheduleRecord {
    ScheduleRecord {
        id,
        user: "alice".into(),
        scope: ScheduleScope::Recurring {
            valid_from: from.map(date),
            valid_to: to.map(date),
        },
        note: note.into(),
        segments: Vec::new(),
        created_at: ts(created),
    }
}

pub fn pinned(id: i64, on: &str, note: &str, created: &str) -> ScheduleRecord {
    ScheduleRecord {
        id,
        user: "alice".into(),
        scope: ScheduleScope::Pinned { date: date(on) },
        note: note.into(),
        segments: Vec::new(),
        created_at: ts(created),
    }
}
