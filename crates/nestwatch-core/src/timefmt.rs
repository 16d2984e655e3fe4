//! Display formatting for timestamps.
//!
//! Format strings live in one constants table so the API and any future
//! render surface agree on how dates look.

use chrono::{DateTime, Utc};

/// "Dec 25, 2024"
pub const FORMAT_DISPLAY_DATE: &str = "%b %d, %Y";
/// "14:30"
pub const FORMAT_DISPLAY_TIME: &str = "%H:%M";
/// "Dec 25, 14:30"
pub const FORMAT_DISPLAY_DATETIME: &str = "%b %d, %H:%M";
/// "Dec 18" (used for week ranges)
pub const FORMAT_WEEK_DAY: &str = "%b %d";

/// Format a date for display.
#[must_use]
pub fn display_date(at: DateTime<Utc>) -> String {
    at.format(FORMAT_DISPLAY_DATE).to_string()
}

/// Format a time for display.
#[must_use]
pub fn display_time(at: DateTime<Utc>) -> String {
    at.format(FORMAT_DISPLAY_TIME).to_string()
}

/// Format a date and time for display.
#[must_use]
pub fn display_datetime(at: DateTime<Utc>) -> String {
    at.format(FORMAT_DISPLAY_DATETIME).to_string()
}

/// Week range like "Dec 18 - Dec 24".
#[must_use]
pub fn week_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{} - {}",
        start.format(FORMAT_WEEK_DAY),
        end.format(FORMAT_WEEK_DAY)
    )
}

/// Relative age of a timestamp ("Just now", "5 minutes ago", "Yesterday").
///
/// `now` is a parameter so callers (and tests) control the clock.
#[must_use]
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(at);
    if delta.num_seconds() < 0 {
        return "In the future".to_string();
    }

    let minutes = delta.num_minutes();
    let hours = delta.num_hours();
    let days = delta.num_days();

    if delta.num_seconds() < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days} days ago")
    } else if days < 30 {
        let weeks = days / 7;
        format!("{weeks} week{} ago", plural(weeks))
    } else if days < 365 {
        let months = days / 30;
        format!("{months} month{} ago", plural(months))
    } else {
        let years = days / 365;
        format!("{years} year{} ago", plural(years))
    }
}

/// Relative age against the current clock.
#[must_use]
pub fn relative_time_from_now(at: DateTime<Utc>) -> String {
    relative_time(at, Utc::now())
}

/// Greeting for an hour of the day (0-23).
#[must_use]
pub fn time_based_greeting(hour: u32, name: &str) -> String {
    if hour < 12 {
        format!("Good morning, {name}")
    } else if hour < 17 {
        format!("Good afternoon, {name}")
    } else {
        format!("Good evening, {name}")
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
