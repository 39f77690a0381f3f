//! Calendar-day helpers for the `YYYYMMDD` dates the API and report use.

use crate::JawboneError;
use chrono::{Datelike, Local, NaiveDate, NaiveTime, TimeZone};

pub const DATE_FORMAT: &str = "%Y%m%d";

pub fn parse_date(s: &str) -> Result<NaiveDate, JawboneError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| JawboneError::InvalidDate(format!("{s}: {e}")))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Integer `YYYYMMDD` key, the shape the API reports in an item's `date` field.
pub fn date_key(date: NaiveDate) -> u32 {
    date.year().unsigned_abs() * 10_000 + date.month() * 100 + date.day()
}

/// Convert a `YYYYMMDD` day to the Unix timestamp of its local midnight,
/// rendered as a decimal string.
pub fn prepare_date(s: &str) -> Result<String, JawboneError> {
    let midnight = parse_date(s)?.and_time(NaiveTime::MIN);
    // Midnight can fall in a DST gap or overlap; take the earliest valid instant.
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| JawboneError::InvalidDate(format!("{s}: no local midnight")))?;
    Ok(local.timestamp().to_string())
}
