use chrono::{Datelike, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_optional_date(input: Option<&String>) -> Result<Option<NaiveDate>, String> {
    match input {
        Some(s) => parse_date(s).map(Some).ok_or_else(|| s.to_string()),
        None => Ok(None),
    }
}

/// "Wed 2026-10-14"
pub fn with_weekday(d: NaiveDate) -> String {
    let wd = match d.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    format!("{} {}", wd, d.format("%Y-%m-%d"))
}
