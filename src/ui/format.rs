use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Backend timestamps look like `2025-03-01 14:30:00`. Render as a
/// localized-ish `MM/DD/YYYY HH:MM`; fall back to the raw string when the
/// server sent something else.
pub fn format_date_time(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(stamp) => stamp.format("%m/%d/%Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `YYYY-MM-DD` → `MM/DD/YYYY`; raw string on parse failure.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `HH:MM` (24h) → `hh:MM AM/PM`; raw string on parse failure.
pub fn format_time(raw: &str) -> String {
    match NaiveTime::parse_from_str(raw, "%H:%M") {
        Ok(time) => time.format("%I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
