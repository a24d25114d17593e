//! Next-occurrence evaluation: the single entry point task handlers call.
//!
//! An evaluation is a pure function of `(now, last_date, rule)`. The
//! [`Evaluator`] only carries the monthly search bounds, so one instance can
//! be shared freely across threads.

use tracing::debug;

use nextdate_core::{format_date, parse_date, Date, EvaluatorConfig, RecurrenceError, Result};

use crate::parser;
use crate::rule::RecurrenceRule;
use crate::strategy::{self, MonthlySearch};

/// Computes next occurrences with a fixed monthly search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    search: MonthlySearch,
}

impl Evaluator {
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self {
            search: MonthlySearch::from(config),
        }
    }

    /// Evaluate text inputs: `now` and `last_date` as `YYYYMMDD`, the raw
    /// rule text as stored with the task. Returns the next date as `YYYYMMDD`.
    ///
    /// An empty rule is reported before the dates are looked at; malformed
    /// dates are reported before the rule grammar.
    pub fn evaluate(&self, now: &str, last_date: &str, rule_text: &str) -> Result<String> {
        if rule_text.trim().is_empty() {
            return Err(RecurrenceError::MissingRule);
        }
        let last = parse_date(last_date)?;
        let now = parse_date(now)?;
        self.evaluate_parsed(now, last, rule_text)
    }

    /// Like [`evaluate`](Self::evaluate) for callers that already hold `now`.
    pub fn evaluate_at(&self, now: Date, last_date: &str, rule_text: &str) -> Result<String> {
        if rule_text.trim().is_empty() {
            return Err(RecurrenceError::MissingRule);
        }
        let last = parse_date(last_date)?;
        self.evaluate_parsed(now, last, rule_text)
    }

    fn evaluate_parsed(&self, now: Date, last: Date, rule_text: &str) -> Result<String> {
        let rule = parser::parse(rule_text)?;
        let next = self.next_occurrence(now, last, &rule)?;
        format_date(next)
    }

    /// Typed evaluation. Rules built in code are checked against the same
    /// bounds the parser enforces.
    pub fn next_occurrence(&self, now: Date, last: Date, rule: &RecurrenceRule) -> Result<Date> {
        rule.validate()?;
        let next = strategy::advance(now, last, rule, &self.search)?;
        debug!(
            kind = %rule.kind(),
            rule = %rule,
            now = %now,
            last = %last,
            next = %next,
            "computed next occurrence"
        );
        Ok(next)
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(now: &str, last_date: &str, rule_text: &str) -> Result<String> {
    Evaluator::default().evaluate(now, last_date, rule_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rule_checked_before_dates() {
        assert_eq!(evaluate("bogus", "bogus", ""), Err(RecurrenceError::MissingRule));
        assert_eq!(evaluate("bogus", "bogus", "  "), Err(RecurrenceError::MissingRule));
    }

    #[test]
    fn dates_checked_before_rule_grammar() {
        assert_eq!(
            evaluate("20240101", "2024-01-01", "q"),
            Err(RecurrenceError::InvalidDate {
                input: "2024-01-01".into()
            })
        );
        assert_eq!(
            evaluate("1/1/2024", "20240101", "d 5"),
            Err(RecurrenceError::InvalidDate {
                input: "1/1/2024".into()
            })
        );
    }

    #[test]
    fn result_leaving_eight_digits_overflows() {
        assert_eq!(
            evaluate("99991231", "99991231", "d 1"),
            Err(RecurrenceError::DateOverflow)
        );
    }

    #[test]
    fn small_monthly_limit_gives_up() {
        let evaluator = Evaluator::new(&EvaluatorConfig {
            monthly_window_years: 1,
            monthly_search_limit_years: 1,
        });
        // 29 Feb after 2024: next is 2028, beyond 2025 + 1.
        assert_eq!(
            evaluator.evaluate("20250101", "20240301", "m 29 2"),
            Err(RecurrenceError::NoOccurrenceFound {
                rule: "m 29 2".into(),
                years: 3,
            })
        );
    }

    #[test]
    fn typed_api_validates_hand_built_rules() {
        let evaluator = Evaluator::default();
        let now = parse_date("20240101").unwrap();
        let err = evaluator
            .next_occurrence(now, now, &RecurrenceRule::Daily { interval: 0 })
            .unwrap_err();
        assert!(err.is_rule_error());
    }

    #[test]
    fn evaluate_at_accepts_parsed_now() {
        let now = parse_date("20240304").unwrap();
        assert_eq!(
            Evaluator::default().evaluate_at(now, "20240301", "w 1,3").unwrap(),
            "20240306"
        );
    }
}
