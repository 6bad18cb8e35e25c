use rshiftclock::config::Config;
use rshiftclock::config::migrate::missing_keys;
use rshiftclock::models::shift::{ShiftSegment, TimeOfDay};
use rshiftclock::utils::colors::color_for_name;
use rshiftclock::utils::mins2readable;

#[test]
fn test_partial_yaml_gets_defaults() {
    let cfg = Config::from_yaml(
        "database: /tmp/x.sqlite\nwindows:\n  out_lock_margin: 20\nholidays:\n  - 2025-06-03\n",
    )
    .unwrap();

    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.windows.out_lock_margin, 20);
    assert_eq!(cfg.windows.in_open_before, 60);
    assert_eq!(cfg.windows.missed_out_cutoff, 90);
    assert_eq!(cfg.clock.max_sync_age_hours, 24);
    assert_eq!(cfg.holidays.len(), 1);
}

#[test]
fn test_missing_keys_lists_dotted_paths() {
    let missing = missing_keys("database: /tmp/x.sqlite\nwindows:\n  out_grace: 30\n").unwrap();
    assert!(missing.contains(&"windows.out_lock_margin".to_string()));
    assert!(missing.contains(&"clock".to_string()));
    assert!(!missing.contains(&"windows.out_grace".to_string()));
    assert!(!missing.contains(&"database".to_string()));

    let full = Config::default().to_yaml().unwrap();
    assert!(missing_keys(&full).unwrap().is_empty());
}

#[test]
fn test_invalid_yaml_is_a_config_error() {
    assert!(Config::from_yaml("windows: [nope").is_err());
}

#[test]
fn test_name_color_is_stable() {
    assert_eq!(color_for_name("Alice"), color_for_name("Alice"));
    assert_eq!(color_for_name("Alice"), color_for_name("  alice "));
}

#[test]
fn test_mins2readable() {
    assert_eq!(mins2readable(45), "45m");
    assert_eq!(mins2readable(65), "1h 05m");
    assert_eq!(mins2readable(720), "12h 00m");
    assert_eq!(mins2readable(-5), "0m");
}

#[test]
fn test_time_of_day_bounds() {
    assert_eq!(TimeOfDay::from_hm(24, 0), Some(TimeOfDay::END_OF_DAY));
    assert!(TimeOfDay::from_hm(24, 1).is_none());
    assert!(TimeOfDay::from_hm(9, 60).is_none());
    assert_ne!(TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY);
}

#[test]
fn test_stored_segments_round_trip() {
    let stored = "09:00-13:00,22:00-06:00";
    let parsed = ShiftSegment::split_stored(stored);
    assert_eq!(parsed.len(), 2);
    assert!(!parsed[0].is_overnight());
    assert!(parsed[1].is_overnight());
    assert_eq!(ShiftSegment::join(&parsed), stored);
}
