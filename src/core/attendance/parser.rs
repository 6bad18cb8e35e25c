//! Free-form shift text → 24-hour times and ordered shift segments.
//!
//! Accepted inputs look like `8am`, `5 PM`, `12mn`, `2pm-10pm`,
//! `9-1 & 5-9`, `8am/4pm-12am` or `٨ ص - ٤ م`.

use crate::errors::TimeParseError;
use crate::models::shift::{MINUTES_PER_DAY, ShiftSegment, TimeOfDay};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static MERIDIEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^a-z])([ap])\.?\s?m\.?(?:$|[^a-z])").expect("meridiem regex"));
static MIDNIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9:.]*mn$").expect("midnight regex"));
static NOON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9:.]*n$").expect("noon regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(?:[:.]([0-9]{1,2}))?").expect("time regex"));
static CLAUSE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:/|,|&|\band\b)\s*").expect("clause regex"));
static RANGE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:-|–|—|\bto\b)\s*").expect("range regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
    Unmarked,
}

/// A single parsed time plus whether it carried any explicit marker.
#[derive(Debug, Clone, Copy)]
struct Token {
    time: TimeOfDay,
    /// No am/pm, noon or midnight marker: the segment may reinterpret it.
    bare: bool,
}

/// Arabic-Indic and Eastern Arabic-Indic digits → ASCII.
fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

const ARABIC_AM: &[&str] = &["ص", "صباحا", "صباح"];
const ARABIC_PM: &[&str] = &["م", "مساء", "مساءا"];

/// Arabic marker words, split on anything that is not a letter so `٨م`
/// still yields `م` while `الدوام` stays a single word.
fn arabic_words(lower: &str) -> impl Iterator<Item = String> + '_ {
    lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.chars().filter(|c| !('\u{064B}'..='\u{0652}').contains(c)).collect())
}

fn detect_meridiem(lower: &str) -> Meridiem {
    if let Some(caps) = MERIDIEM_RE.captures(lower) {
        return if &caps[1] == "a" { Meridiem::Am } else { Meridiem::Pm };
    }
    for word in arabic_words(lower) {
        if ARABIC_AM.contains(&word.as_str()) {
            return Meridiem::Am;
        }
        if ARABIC_PM.contains(&word.as_str()) {
            return Meridiem::Pm;
        }
    }
    Meridiem::Unmarked
}

fn parse_token(text: &str) -> Result<Token, TimeParseError> {
    let lower = to_ascii_digits(&text.to_lowercase());
    let cleaned: String = lower
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ':' || *c == '.')
        .collect();

    if cleaned.contains("midnight") || cleaned.contains("منتصف") || MIDNIGHT_RE.is_match(&cleaned) {
        return Ok(Token {
            time: TimeOfDay::END_OF_DAY,
            bare: false,
        });
    }
    if cleaned.contains("noon") || cleaned.contains("ظهر") || NOON_RE.is_match(&cleaned) {
        return Ok(Token {
            time: TimeOfDay::NOON,
            bare: false,
        });
    }

    let meridiem = detect_meridiem(&lower);
    let no_time = || TimeParseError::NoTime(text.trim().to_string());

    let caps = TIME_RE.captures(&cleaned).ok_or_else(no_time)?;
    let digits = &caps[1];
    let (mut hour, minute): (u16, u16) = match caps.get(2) {
        Some(m) => (
            digits.parse().map_err(|_| no_time())?,
            m.as_str().parse().map_err(|_| no_time())?,
        ),
        // compact HHMM / HMM
        None if (3..=4).contains(&digits.len()) => {
            let (h, m) = digits.split_at(digits.len() - 2);
            (h.parse().map_err(|_| no_time())?, m.parse().map_err(|_| no_time())?)
        }
        None if digits.len() <= 2 => (digits.parse().map_err(|_| no_time())?, 0),
        None => return Err(TimeParseError::HourOutOfRange(text.trim().to_string())),
    };

    if hour > 24 {
        return Err(TimeParseError::HourOutOfRange(text.trim().to_string()));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange(text.trim().to_string()));
    }

    match meridiem {
        Meridiem::Pm if hour < 12 => hour += 12,
        Meridiem::Am if hour == 12 => hour = 0,
        _ => {}
    }

    let time = TimeOfDay::from_hm(hour, minute)
        .ok_or_else(|| TimeParseError::HourOutOfRange(text.trim().to_string()))?;

    Ok(Token {
        time,
        bare: meridiem == Meridiem::Unmarked,
    })
}

/// Normalize one time expression to minutes since midnight.
///
/// `12mn`/`midnight` yield the `24:00` sentinel, never `00:00`.
pub fn normalize(text: &str) -> Result<TimeOfDay, TimeParseError> {
    parse_token(text).map(|t| t.time)
}

/// Build a segment from two tokens, resolving unmarked hours.
///
/// - both unmarked, start 1..=5 o'clock: start is afternoon ("5-9" → 17:00)
/// - unmarked start, marked end: start moves to pm when that keeps it
///   more than 12 hours before the end ("2-10pm" → 14:00)
/// - unmarked end not after start: end moves 12 hours later when that
///   lands after the start; a bare 12 becomes 24:00
fn infer_segment(start: Token, end: Token) -> ShiftSegment {
    let mut s = start.time.minutes();
    let mut e = end.time.minutes();

    if start.bare && s < 720 {
        if end.bare {
            if (60..360).contains(&s) {
                s += 720;
            }
        } else if s + 720 < e {
            s += 720;
        }
    }

    if end.bare && e <= s {
        let candidate = match e {
            720 => MINUTES_PER_DAY,
            x if x < 720 => x + 720,
            x => x,
        };
        if candidate > s {
            e = candidate;
        }
    }

    // midnight as a start is the top of the day; 00:00 as an end is 24:00
    if s == MINUTES_PER_DAY {
        s = 0;
    }
    if e == 0 && s > 0 {
        e = MINUTES_PER_DAY;
    }

    ShiftSegment::new(
        TimeOfDay::from_minutes(s).unwrap_or(TimeOfDay::MIDNIGHT),
        TimeOfDay::from_minutes(e).unwrap_or(TimeOfDay::END_OF_DAY),
    )
}

/// True when `s` already contains `start <sep> end`.
fn range_complete(s: &str) -> bool {
    RANGE_SPLIT_RE
        .find_iter(s)
        .last()
        .is_some_and(|m| !s[m.end()..].trim().is_empty())
}

/// Break a clause where a new time starts right after a complete range
/// ("8am-4pm 6pm-10pm" → two clauses).
fn split_on_new_time(clause: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf: Vec<&str> = Vec::new();

    for word in clause.split_whitespace() {
        let starts_time = word.chars().next().is_some_and(|c| c.is_ascii_digit());
        if starts_time && !buf.is_empty() && range_complete(&buf.join(" ")) {
            out.push(buf.join(" "));
            buf.clear();
        }
        buf.push(word);
    }
    if !buf.is_empty() {
        out.push(buf.join(" "));
    }
    out
}

/// Split a compound shift description into ordered segments.
///
/// Source order is kept: list position is the shift number. Clauses that
/// fail to parse are dropped with a warning. A lone time followed by a
/// range opens a segment that ends where the range starts
/// ("8am/4pm-12am" → 08:00-16:00, 16:00-24:00).
pub fn split_segments(text: &str) -> Vec<ShiftSegment> {
    let lower = to_ascii_digits(&text.to_lowercase());
    let mut out = Vec::new();
    let mut pending: Option<Token> = None;

    let clauses: Vec<String> = CLAUSE_SPLIT_RE
        .split(&lower)
        .flat_map(split_on_new_time)
        .collect();

    for clause in &clauses {
        if clause.contains("starting") {
            debug!(clause = %clause, "skipping annotation clause");
            continue;
        }

        let parts: Vec<&str> = RANGE_SPLIT_RE
            .split(clause)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => {}
            [single] => match parse_token(single) {
                Ok(tok) => {
                    if pending.replace(tok).is_some() {
                        warn!(clause = %clause, "discarding time without a range");
                    }
                }
                Err(e) => warn!(clause = %clause, error = %e, "dropping unparseable shift clause"),
            },
            [first, .., last] => {
                let (start, end) = match (parse_token(first), parse_token(last)) {
                    (Ok(s), Ok(e)) => (s, e),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!(clause = %clause, error = %e, "dropping unparseable shift clause");
                        continue;
                    }
                };
                if let Some(prev) = pending.take() {
                    out.push(infer_segment(prev, start));
                }
                out.push(infer_segment(start, end));
            }
        }
    }

    if pending.is_some() {
        warn!(text = %text, "discarding trailing time without a range");
    }

    out
}
