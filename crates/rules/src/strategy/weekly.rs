//! Listed weekdays.

use std::collections::BTreeSet;

use nextdate_core::{weekday_number, Date, Param, RecurrenceError, Result};

/// First date strictly after `now` (and after `last`) whose weekday number,
/// Monday = 1 through Sunday = 7, is in `days`.
///
/// Unlike the other strategies this comparison is strict: a match falling on
/// `now` itself is skipped.
pub fn next_weekly(now: Date, last: Date, days: &BTreeSet<u8>) -> Result<Date> {
    // Nothing on or before `now` can match, so start from the later of the two.
    let mut candidate = last.max(now);

    // One full week visits every weekday.
    for _ in 0..7 {
        candidate = candidate.succ_opt().ok_or(RecurrenceError::DateOverflow)?;
        if candidate > now && days.contains(&weekday_number(candidate)) {
            return Ok(candidate);
        }
    }

    Err(RecurrenceError::MalformedParameter {
        param: Param::Weekday,
        reason: "no valid day of week listed".to_string(),
    })
}
