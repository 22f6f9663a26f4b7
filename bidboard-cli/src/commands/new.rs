//! Create a new user-authored event.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, NaiveTime};

use bidboard_core::event::{EventCategory, EventDraft};
use bidboard_core::store::EventGateway;
use bidboard_core::dates;

pub struct NewArgs {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

pub async fn run(gateway: &EventGateway, args: NewArgs) -> Result<()> {
    let (start, start_has_time) = parse_stamp(&args.start)?;
    let (end, end_has_time) = match &args.end {
        Some(raw) => parse_stamp(raw)?,
        None => (start, start_has_time),
    };
    let all_day = !(start_has_time || end_has_time);

    let category = match &args.category {
        Some(raw) => Some(
            EventCategory::parse_lenient(raw)
                .with_context(|| format!("Unknown category '{}'", raw))?,
        ),
        None => None,
    };

    let created = gateway
        .create(EventDraft {
            title: args.title,
            start,
            end,
            all_day,
            description: args.description,
            location: args.location,
            color: None,
            category,
        })
        .await?;

    println!("Created '{}' ({})", created.title, created.id);
    Ok(())
}

/// Parse a CLI date/time argument. Returns the timestamp and whether a
/// time-of-day was given (date-only input produces an all-day event).
pub(crate) fn parse_stamp(raw: &str) -> Result<(NaiveDateTime, bool)> {
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok((dt, true));
        }
    }
    // Date-only and human-readable forms go through the engine normalizer.
    if let Some(date) = dates::try_normalize(raw) {
        return Ok((date.and_time(NaiveTime::MIN), false));
    }
    bail!("Unrecognized date/time '{}'", raw)
}
