//! Date helpers for the compact `YYYYMMDD[HHMMSS]` timestamps the API uses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

const COMPACT: &str = "%Y%m%d%H%M%S";

/// `YYYYMMDD` → `DD/MM/YYYY`. Anything else is "Invalid date".
pub fn format_date(value: &str) -> String {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return "Invalid date".to_string();
    }
    format!("{}/{}/{}", &value[6..8], &value[4..6], &value[0..4])
}

/// Parse compact, date-only or RFC 3339 timestamps.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, COMPACT) {
        return Some(dt);
    }
    if value.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(value, "%Y%m%d") {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc())
}

/// `"01 Mar 2025"` style date; unparseable input is returned as-is.
pub fn format_joined_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => value.to_string(),
    }
}

/// Compact timestamp used in export file names and report titles.
pub fn format_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(COMPACT).to_string()
}
