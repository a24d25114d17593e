//! Same calendar day every year.

use chrono::{Datelike, Months};

use nextdate_core::{Date, RecurrenceError, Result};

/// First anniversary of `last` (at least one year later) on or after `now`.
///
/// Each candidate is `last` plus a whole number of years, computed from
/// `last` itself. chrono clamps a Feb 29 anniversary to Feb 28 in common
/// years, and the schedule returns to Feb 29 in the next leap year.
pub fn next_yearly(now: Date, last: Date) -> Result<Date> {
    // Anniversaries before now's year can never qualify.
    let mut years = (now.year() - last.year()).max(1) as u32;
    loop {
        let months = years.checked_mul(12).ok_or(RecurrenceError::DateOverflow)?;
        let candidate = last
            .checked_add_months(Months::new(months))
            .ok_or(RecurrenceError::DateOverflow)?;
        if candidate >= now {
            return Ok(candidate);
        }
        years += 1;
    }
}
