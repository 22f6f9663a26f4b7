//! Normalization of loosely formatted date text into local calendar dates.
//!
//! Project records arrive with dates in several textual encodings: strict
//! `YYYY-MM-DD`, full timestamps, and human-readable strings like
//! "March 5, 2025, at 10:00 AM". Generic date parsing of `YYYY-MM-DD` text is
//! timezone-sensitive and can shift the displayed day by one, so the strict
//! forms are split into numeric components and constructed as local dates
//! directly, bypassing any timezone conversion.

use chrono::{Local, NaiveDate};
use tracing::warn;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Normalize date text into a local calendar date. Never fails: unparseable
/// input falls back to today's date (logged as a warning, not an error).
pub fn normalize(input: Option<&str>) -> NaiveDate {
    match input.and_then(try_normalize) {
        Some(date) => date,
        None => {
            if let Some(raw) = input {
                if !raw.trim().is_empty() {
                    warn!(input = raw, "unrecognized date text, defaulting to today");
                }
            }
            today()
        }
    }
}

/// Structured normalization without the today-fallback.
///
/// Used by milestone derivation for merge-eligible dates, where defaulting
/// garbage text to "today" would merge unrelated milestones onto the current
/// date.
pub fn try_normalize(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_human_readable(raw)
        .or_else(|| parse_strict_ymd(raw))
        .or_else(|| date_portion(raw).and_then(parse_strict_ymd))
        .or_else(|| parse_generic(raw))
}

/// The canonical `YYYY-MM-DD` key used to group milestones by day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "`<Month name> <day>, <year>[, at <time>]`" with a fixed month-name table.
/// The trailing time, if present, is ignored for calendar placement.
fn parse_human_readable(raw: &str) -> Option<NaiveDate> {
    let lower = raw.to_lowercase();
    let mut words = lower.split_whitespace();

    let month_word = words.next()?;
    let month = MONTH_NAMES.iter().position(|m| *m == month_word)? as u32 + 1;
    let day: u32 = words.next()?.trim_end_matches(',').parse().ok()?;
    let year: i32 = words.next()?.trim_end_matches(',').parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strict `YYYY-MM-DD`, constructed from numeric components as a local date.
fn parse_strict_ymd(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[5..7].parse().ok()?;
    let day: u32 = raw[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// For inputs with a date/time separator, the date portion before it.
fn date_portion(raw: &str) -> Option<&str> {
    raw.split_once(['T', ' ']).map(|(date, _)| date)
}

/// Last-resort generic parsing for the remaining encodings seen in the wild.
fn parse_generic(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%m/%d/%Y", "%B %d %Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    None
}
