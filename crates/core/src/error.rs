use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule parameter a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// Day stride of a `d` rule.
    Interval,
    /// Day-of-week list of a `w` rule.
    Weekday,
    /// Day-of-month list of an `m` rule.
    MonthDay,
    /// Month list of an `m` rule.
    Month,
}

impl Param {
    /// Human-readable bound for values of this parameter.
    pub fn expected_range(&self) -> &'static str {
        match self {
            Param::Interval => "1..=400",
            Param::Weekday => "1..=7",
            Param::MonthDay => "1..=31, -1 or -2",
            Param::Month => "1..=12",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Param::Interval => "interval in days",
            Param::Weekday => "day of week",
            Param::MonthDay => "day of month",
            Param::Month => "month",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("no repeat rule specified")]
    MissingRule,

    #[error("unsupported repeat format '{0}'")]
    UnsupportedFormat(String),

    #[error("malformed {param}: {reason}")]
    MalformedParameter { param: Param, reason: String },

    #[error("{param} {value} is out of range, expected {range}", range = .param.expected_range())]
    OutOfRange { param: Param, value: i64 },

    #[error("invalid date '{input}', expected YYYYMMDD")]
    InvalidDate { input: String },

    #[error("no occurrence of '{rule}' found within {years} years")]
    NoOccurrenceFound { rule: String, years: u32 },

    #[error("next occurrence falls outside the YYYYMMDD date range")]
    DateOverflow,
}

impl RecurrenceError {
    pub(crate) fn invalid_date(input: &str) -> Self {
        RecurrenceError::InvalidDate {
            input: input.to_string(),
        }
    }

    /// Whether the error stems from the rule text rather than the dates or the search.
    pub fn is_rule_error(&self) -> bool {
        matches!(
            self,
            RecurrenceError::MissingRule
                | RecurrenceError::UnsupportedFormat(_)
                | RecurrenceError::MalformedParameter { .. }
                | RecurrenceError::OutOfRange { .. }
        )
    }
}

/// Result alias for recurrence operations.
pub type Result<T> = std::result::Result<T, RecurrenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_constraint() {
        let err = RecurrenceError::OutOfRange {
            param: Param::Interval,
            value: 500,
        };
        assert_eq!(
            err.to_string(),
            "interval in days 500 is out of range, expected 1..=400"
        );
    }

    #[test]
    fn malformed_names_parameter() {
        let err = RecurrenceError::MalformedParameter {
            param: Param::Weekday,
            reason: "'x' is not an integer".into(),
        };
        assert_eq!(err.to_string(), "malformed day of week: 'x' is not an integer");
    }

    #[test]
    fn rule_errors_are_classified() {
        assert!(RecurrenceError::MissingRule.is_rule_error());
        assert!(RecurrenceError::UnsupportedFormat("x".into()).is_rule_error());
        assert!(!RecurrenceError::invalid_date("2024").is_rule_error());
        assert!(!RecurrenceError::DateOverflow.is_rule_error());
    }
}
