//! Parsing and rendering of brevet start times.
//!
//! Start times are accepted either as RFC 3339 (`2021-05-01T07:00:00-07:00`)
//! or as naive local times (`2021-05-01T07:00`, `2021-05-01 07:00:00`) that are
//! pinned to a default UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc};

use crate::errors::{BrevetError, Result};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a start time, falling back to `default_offset` for naive input.
pub fn parse_start_time(raw: &str, default_offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| BrevetError::InvalidStartTime(trimmed.to_string()))?;

    default_offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| BrevetError::InvalidStartTime(trimmed.to_string()))
}

/// Parses a UTC offset such as `+02:00`, `-0700`, `Z` or `UTC`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| BrevetError::InvalidStartTime(format!("invalid UTC offset: {trimmed}")))
}

/// Renders a time as RFC 3339 with second precision.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}
