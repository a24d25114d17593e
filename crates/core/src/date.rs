//! Calendar date type and its fixed-width `YYYYMMDD` text form.
//!
//! Dates carry no time of day. Every date handed back to callers goes through
//! [`format_date`], which refuses anything the 8-digit form cannot hold, so a
//! formatted date always parses back to the same value.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{RecurrenceError, Result};

/// A calendar day in the single implicit local zone.
pub type Date = NaiveDate;

/// chrono format string matching the stored `YYYYMMDD` form.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Largest year the 8-digit form can represent.
pub const MAX_YEAR: i32 = 9999;

/// Parse an 8-digit `YYYYMMDD` string.
///
/// Signs, separators, padding and impossible days (e.g. `20230229`) are all
/// rejected with [`RecurrenceError::InvalidDate`].
pub fn parse_date(input: &str) -> Result<Date> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecurrenceError::invalid_date(input));
    }

    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        input[range]
            .parse()
            .map_err(|_| RecurrenceError::invalid_date(input))
    };
    let year = field(0..4)? as i32;
    let month = field(4..6)?;
    let day = field(6..8)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| RecurrenceError::invalid_date(input))
}

/// Render a date as `YYYYMMDD`.
pub fn format_date(date: Date) -> Result<String> {
    if !(0..=MAX_YEAR).contains(&date.year()) {
        return Err(RecurrenceError::DateOverflow);
    }
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Weekday number with Monday = 1 through Sunday = 7.
pub fn weekday_number(date: Date) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Last calendar day of the given month, accounting for leap years.
pub fn last_day_of_month(year: i32, month: u32) -> Option<Date> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.checked_sub_days(Days::new(1))
}
