// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Date and relative-time display.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATE_FORMAT: &str = "%d %b %Y";
const DATE_TIME_FORMAT: &str = "%d %b %Y, %I:%M %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse a timestamp as the API sends them. Timestamps without an offset,
/// and bare dates, are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    let utc = FixedOffset::east(0);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|date| utc.from_utc_datetime(&date.and_hms(0, 0, 0)))
}

fn render(input: Option<&str>, fmt: &str) -> String {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(dt) => dt.naive_local().format(fmt).to_string(),
            None => INVALID_DATE.to_string(),
        },
    }
}

/// `"19 Oct 2026"`, `"N/A"` for a missing value, or `"Invalid Date"`.
pub fn format_date(input: Option<&str>) -> String {
    render(input, DATE_FORMAT)
}

/// `"19 Oct 2026, 02:30 PM"`, with the same fallbacks as `format_date`.
pub fn format_date_time(input: Option<&str>) -> String {
    render(input, DATE_TIME_FORMAT)
}

fn plural(n: i64, unit: &str, units: &str) -> String {
    format!("{} {} ago", n, if n == 1 { unit } else { units })
}

/// How long ago `then` was, bucketed. From seven days on, the absolute date
/// is shown instead. Times in the future read as "Just now".
pub fn format_relative<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then.with_timezone(&Utc));
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "min", "mins")
    } else if hours < 24 {
        plural(hours, "hour", "hours")
    } else if days < 7 {
        plural(days, "day", "days")
    } else {
        then.naive_local().format(DATE_FORMAT).to_string()
    }
}

/// `format_relative` over an API timestamp string.
pub fn format_relative_str(input: Option<&str>, now: &DateTime<Utc>) -> String {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(dt) => format_relative(&dt, now),
            None => INVALID_DATE.to_string(),
        },
    }
}
