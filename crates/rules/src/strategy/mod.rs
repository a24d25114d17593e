//! Date-advance strategies, one per rule family.
//!
//! Daily, yearly and monthly results may land on `now` itself (`>= now`);
//! weekly results are always strictly after `now`. Monthly candidates must
//! also be strictly after `now`, matching the candidate filter against
//! `last`.

mod daily;
mod monthly;
mod weekly;
mod yearly;

pub use self::daily::next_daily;
pub use self::monthly::{next_monthly, MonthlySearch};
pub use self::weekly::next_weekly;
pub use self::yearly::next_yearly;

use nextdate_core::{Date, RecurrenceError, Result};

use crate::rule::RecurrenceRule;

/// Dispatch to the strategy for `rule`.
pub fn advance(
    now: Date,
    last: Date,
    rule: &RecurrenceRule,
    search: &MonthlySearch,
) -> Result<Date> {
    match rule {
        RecurrenceRule::Daily { interval } => next_daily(now, last, *interval),
        RecurrenceRule::Yearly => next_yearly(now, last),
        RecurrenceRule::Weekly { days } => next_weekly(now, last, days),
        RecurrenceRule::Monthly { days, months } => {
            next_monthly(now, last, days, months, search).ok_or_else(|| {
                RecurrenceError::NoOccurrenceFound {
                    rule: rule.to_string(),
                    years: search.searched_years(now, last),
                }
            })
        }
    }
}
