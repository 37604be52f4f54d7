//! Calendar date parsing and formatting
//!
//! Dates cross every boundary (CLI arguments, JSON files, exports) as
//! `YYYY-MM-DD`. Anything after the tenth character that is separated by a
//! space or `T` (a time of day) is ignored.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{FolioError, FolioResult};

/// Canonical date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest year accepted for any record
pub const MIN_YEAR: i32 = 1900;

/// Parse a `YYYY-MM-DD` date, ignoring a trailing time component
pub fn parse_date(s: &str) -> FolioResult<NaiveDate> {
    let trimmed = s.trim();

    let date_part = match trimmed.char_indices().nth(10) {
        Some((idx, ' ')) | Some((idx, 'T')) => &trimmed[..idx],
        _ => trimmed,
    };

    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| FolioError::InvalidDate(s.to_string()))?;

    if date.year() < MIN_YEAR {
        return Err(FolioError::InvalidDate(format!(
            "{} is before {}",
            s, MIN_YEAR
        )));
    }

    Ok(date)
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
