//! Parsing of the free-form `Data` column.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a stored date, day-first for slashed dates. Returns `None` for
/// anything unrecognised instead of failing the load.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a date typed by the user on entry. Accepts the same shapes as
/// stored dates.
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    parse_stored_date(raw)
}

/// Renders `date` with a strftime `format`, falling back to ISO when the
/// format cannot render a date.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(format)) {
        Ok(()) => rendered,
        Err(_) => date.format(DATE_FORMATS[0]).to_string(),
    }
}
