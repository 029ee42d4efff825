//! Timestamp parsing and formatting shared by the store and the views.
//!
//! Stored timestamps are read leniently: anything that does not parse becomes
//! `None` instead of failing the whole query.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a timestamp the way the store writes it (RFC 3339, microseconds, `Z`).
pub fn format_for_store(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp. Accepts RFC 3339 and SQLite's
/// `YYYY-MM-DD HH:MM:SS[.fff]` form (taken as UTC).
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Standard textual form for API output.
pub fn to_iso(dt: Option<&DateTime<Utc>>) -> Option<String> {
    dt.map(|dt| dt.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Parse-or-null normalization of a raw stored value.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_lenient).as_ref().and_then(|dt| to_iso(Some(dt)))
}
