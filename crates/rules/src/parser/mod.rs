//! Rule text parsing and validation.
//!
//! Grammar (tokens separated by whitespace, lists by commas):
//!
//! - `d <N>` — every N days, `1..=400`
//! - `y` — yearly; further tokens are ignored
//! - `w <D,...>` — weekdays, `1..=7` with Monday = 1
//! - `m <D,...> [M,...]` — days of month `1..=31`, `-1` (last) or `-2`
//!   (second to last), optionally restricted to months `1..=12`
//!
//! The first character of the first token selects the family.

use std::collections::BTreeSet;

use nextdate_core::{Param, RecurrenceError, Result};

use crate::rule::{MonthDay, RecurrenceRule, ALL_MONTHS};


/// Largest accepted day stride of a daily rule.
pub const MAX_DAILY_INTERVAL: i64 = 400;

/// Parse and validate rule text.
pub fn parse(rule_text: &str) -> Result<RecurrenceRule> {
    let tokens: Vec<&str> = rule_text.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Err(RecurrenceError::MissingRule);
    };

    match first.chars().next() {
        Some('d') => parse_daily(&tokens),
        Some('y') => Ok(RecurrenceRule::Yearly),
        Some('w') => parse_weekly(&tokens),
        Some('m') => parse_monthly(&tokens),
        _ => Err(RecurrenceError::UnsupportedFormat(rule_text.trim().to_string())),
    }
}

/// Check rule text without keeping the parsed rule.
pub fn validate(rule_text: &str) -> Result<()> {
    parse(rule_text).map(|_| ())
}

fn parse_daily(tokens: &[&str]) -> Result<RecurrenceRule> {
    match tokens.len() {
        1 => return Err(malformed(Param::Interval, "missing interval, expected `d <days>`")),
        2 => {}
        n => return Err(trailing(Param::Interval, n - 2)),
    }

    let interval = parse_int(Param::Interval, tokens[1])?;
    if !(1..=MAX_DAILY_INTERVAL).contains(&interval) {
        return Err(out_of_range(Param::Interval, interval));
    }
    Ok(RecurrenceRule::Daily {
        interval: interval as u32,
    })
}

fn parse_weekly(tokens: &[&str]) -> Result<RecurrenceRule> {
    match tokens.len() {
        1 => return Err(malformed(Param::Weekday, "missing days of week, expected `w <days>`")),
        2 => {}
        n => return Err(trailing(Param::Weekday, n - 2)),
    }

    let days = parse_list(Param::Weekday, tokens[1], |v| {
        (1..=7).contains(&v).then_some(v as u8)
    })?;
    Ok(RecurrenceRule::Weekly { days })
}

fn parse_monthly(tokens: &[&str]) -> Result<RecurrenceRule> {
    match tokens.len() {
        1 => {
            return Err(malformed(
                Param::MonthDay,
                "missing days of month, expected `m <days> [months]`",
            ))
        }
        2 | 3 => {}
        n => return Err(trailing(Param::Month, n - 3)),
    }

    let days = parse_list(Param::MonthDay, tokens[1], MonthDay::from_code)?;
    let months = match tokens.get(2) {
        Some(list) => parse_list(Param::Month, list, |v| {
            (1..=12).contains(&v).then_some(v as u8)
        })?,
        None => ALL_MONTHS.into_iter().collect(),
    };
    Ok(RecurrenceRule::Monthly { days, months })
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a comma-separated integer list, mapping each value through `accept`.
/// `accept` returns `None` for values outside the parameter's range.
fn parse_list<T: Ord>(
    param: Param,
    list: &str,
    accept: impl Fn(i64) -> Option<T>,
) -> Result<BTreeSet<T>> {
    let mut values = BTreeSet::new();
    for part in list.split(',') {
        let value = parse_int(param, part)?;
        match accept(value) {
            Some(v) => {
                values.insert(v);
            }
            None => return Err(out_of_range(param, value)),
        }
    }
    Ok(values)
}

fn parse_int(param: Param, token: &str) -> Result<i64> {
    if token.is_empty() {
        return Err(malformed(param, "empty value in list"));
    }
    token
        .parse::<i64>()
        .map_err(|_| malformed(param, format!("'{token}' is not an integer")))
}

fn malformed(param: Param, reason: impl Into<String>) -> RecurrenceError {
    RecurrenceError::MalformedParameter {
        param,
        reason: reason.into(),
    }
}

fn trailing(param: Param, extra: usize) -> RecurrenceError {
    malformed(param, format!("{extra} unexpected trailing parameter(s)"))
}

fn out_of_range(param: Param, value: i64) -> RecurrenceError {
    RecurrenceError::OutOfRange { param, value }
}
