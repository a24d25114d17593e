//! Listed days of listed months.
//!
//! Day and month sets may be disjoint ("the 1st and 15th of March and
//! October"), so the next occurrence cannot be found by stepping. Instead
//! every `(day, month, year)` combination in a window of years is built,
//! impossible days are dropped, and the survivors are sorted.
//!
//! The first window starts at the year of the last date. When it yields
//! nothing after `now` the search moves on to the following window, up to a
//! hard cap, and then reports that no occurrence exists.

use std::collections::BTreeSet;
use std::ops::Range;

use chrono::{Datelike, NaiveDate};
use tracing::{trace, warn};

use nextdate_core::{last_day_of_month, Date, EvaluatorConfig, MAX_YEAR};

use crate::rule::MonthDay;

/// Window and cap of the monthly search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySearch {
    /// Years enumerated per window.
    pub window_years: u32,
    /// Years past `max(now, last)` the search may reach.
    pub limit_years: u32,
}

impl Default for MonthlySearch {
    fn default() -> Self {
        Self::from(&EvaluatorConfig::default())
    }
}

impl From<&EvaluatorConfig> for MonthlySearch {
    fn from(cfg: &EvaluatorConfig) -> Self {
        Self {
            window_years: cfg.monthly_window_years,
            limit_years: cfg.monthly_search_limit_years,
        }
    }
}

impl MonthlySearch {
    /// Last year (inclusive) the search may enumerate.
    pub fn final_year(&self, now: Date, last: Date) -> i32 {
        let limit = i32::try_from(self.limit_years).unwrap_or(MAX_YEAR);
        last.year()
            .max(now.year())
            .saturating_add(limit)
            .min(MAX_YEAR)
    }

    /// Number of years the search covers, starting at the year of `last`.
    pub fn searched_years(&self, now: Date, last: Date) -> u32 {
        (self.final_year(now, last) - last.year() + 1).max(0) as u32
    }
}

/// First candidate strictly after both `last` and `now`, or `None` when the
/// search exhausts its cap.
pub fn next_monthly(
    now: Date,
    last: Date,
    days: &BTreeSet<MonthDay>,
    months: &BTreeSet<u8>,
    search: &MonthlySearch,
) -> Option<Date> {
    let window = i32::try_from(search.window_years.max(1)).unwrap_or(MAX_YEAR);
    let final_year = search.final_year(now, last);

    let mut start = last.year();
    while start <= final_year {
        let end = start.saturating_add(window).min(final_year + 1);

        let mut candidates = window_candidates(start..end, days, months, last);
        candidates.sort_unstable();
        trace!(
            from = start,
            to = end - 1,
            candidates = candidates.len(),
            "enumerated monthly window"
        );

        if let Some(next) = candidates.into_iter().find(|d| *d > now) {
            return Some(next);
        }

        if start == last.year() {
            warn!(
                last = %last,
                now = %now,
                window_years = window,
                "no monthly occurrence in first window, widening search"
            );
        }
        start = end;
    }

    warn!(last = %last, now = %now, final_year, "monthly search exhausted");
    None
}

/// All valid dates in `years` strictly after `last`, unsorted.
fn window_candidates(
    years: Range<i32>,
    days: &BTreeSet<MonthDay>,
    months: &BTreeSet<u8>,
    last: Date,
) -> Vec<Date> {
    let mut out = Vec::with_capacity(days.len() * months.len() * years.len());
    for &day in days {
        for &month in months {
            for year in years.clone() {
                match candidate(year, u32::from(month), day) {
                    Some(date) if date > last => out.push(date),
                    _ => {}
                }
            }
        }
    }
    out
}

/// The date `day` names in the given month, or `None` if it does not exist
/// there (e.g. the 31st of April).
fn candidate(year: i32, month: u32, day: MonthDay) -> Option<Date> {
    match day {
        MonthDay::Day(d) => NaiveDate::from_ymd_opt(year, month, u32::from(d)),
        MonthDay::Last => last_day_of_month(year, month),
        MonthDay::SecondToLast => last_day_of_month(year, month)?.pred_opt(),
    }
}
