//! Parsed recurrence rule value types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use nextdate_core::{Param, RecurrenceError};

use crate::parser;

/// Every month of the year, the default month set of a monthly rule.
pub const ALL_MONTHS: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

// ── Month day ───────────────────────────────────────────────────────

/// A day-of-month selector in a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonthDay {
    /// A fixed calendar day, `1..=31`.
    Day(u8),
    /// The last day of the month (`-1`).
    Last,
    /// The day before the last day of the month (`-2`).
    SecondToLast,
}

impl MonthDay {
    /// Map the textual code back to a selector.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1..=31 => Some(MonthDay::Day(code as u8)),
            -1 => Some(MonthDay::Last),
            -2 => Some(MonthDay::SecondToLast),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            MonthDay::Day(d) => i64::from(*d),
            MonthDay::Last => -1,
            MonthDay::SecondToLast => -2,
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ── Rule ────────────────────────────────────────────────────────────

/// Rule family, the first character of the rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Daily,
    Yearly,
    Weekly,
    Monthly,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleKind::Daily => "daily",
            RuleKind::Yearly => "yearly",
            RuleKind::Weekly => "weekly",
            RuleKind::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// A validated recurrence rule.
///
/// Serializes as its canonical text form, so `"w 1,3"` in JSON or YAML
/// deserializes through the same validation as [`parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecurrenceRule {
    /// Every `interval` days.
    Daily { interval: u32 },
    /// Same month and day every year.
    Yearly,
    /// On the listed weekdays, Monday = 1 through Sunday = 7.
    Weekly { days: BTreeSet<u8> },
    /// On the listed days of the listed months.
    Monthly {
        days: BTreeSet<MonthDay>,
        months: BTreeSet<u8>,
    },
}

impl RecurrenceRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            RecurrenceRule::Daily { .. } => RuleKind::Daily,
            RecurrenceRule::Yearly => RuleKind::Yearly,
            RecurrenceRule::Weekly { .. } => RuleKind::Weekly,
            RecurrenceRule::Monthly { .. } => RuleKind::Monthly,
        }
    }

    /// Check the bounds the parser enforces, for rules built in code.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        match self {
            RecurrenceRule::Daily { interval } => {
                let value = i64::from(*interval);
                check(Param::Interval, value, (1..=parser::MAX_DAILY_INTERVAL).contains(&value))
            }
            RecurrenceRule::Yearly => Ok(()),
            RecurrenceRule::Weekly { days } => {
                non_empty(Param::Weekday, days.len())?;
                days.iter().try_for_each(|d| {
                    check(Param::Weekday, i64::from(*d), (1..=7).contains(d))
                })
            }
            RecurrenceRule::Monthly { days, months } => {
                non_empty(Param::MonthDay, days.len())?;
                non_empty(Param::Month, months.len())?;
                days.iter().try_for_each(|d| {
                    check(Param::MonthDay, d.code(), MonthDay::from_code(d.code()) == Some(*d))
                })?;
                months.iter().try_for_each(|m| {
                    check(Param::Month, i64::from(*m), (1..=12).contains(m))
                })
            }
        }
    }
}

fn check(param: Param, value: i64, ok: bool) -> Result<(), RecurrenceError> {
    if ok {
        Ok(())
    } else {
        Err(RecurrenceError::OutOfRange { param, value })
    }
}

fn non_empty(param: Param, len: usize) -> Result<(), RecurrenceError> {
    if len == 0 {
        return Err(RecurrenceError::MalformedParameter {
            param,
            reason: "empty list".to_string(),
        });
    }
    Ok(())
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval } => write!(f, "d {interval}"),
            RecurrenceRule::Yearly => f.write_str("y"),
            RecurrenceRule::Weekly { days } => write!(f, "w {}", join(days)),
            RecurrenceRule::Monthly { days, months } => {
                write!(f, "m {}", join(days))?;
                if months.len() != ALL_MONTHS.len() {
                    write!(f, " {}", join(months))?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl TryFrom<String> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parser::parse(&value)
    }
}

impl From<RecurrenceRule> for String {
    fn from(rule: RecurrenceRule) -> Self {
        rule.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_codes() {
        assert_eq!(MonthDay::from_code(15), Some(MonthDay::Day(15)));
        assert_eq!(MonthDay::from_code(-1), Some(MonthDay::Last));
        assert_eq!(MonthDay::from_code(-2), Some(MonthDay::SecondToLast));
        assert_eq!(MonthDay::from_code(0), None);
        assert_eq!(MonthDay::from_code(32), None);
        assert_eq!(MonthDay::from_code(-3), None);
        assert_eq!(MonthDay::SecondToLast.code(), -2);
    }

    #[test]
    fn display_is_canonical() {
        let rule = RecurrenceRule::Monthly {
            days: [MonthDay::Last, MonthDay::Day(1)].into_iter().collect(),
            months: [8, 2].into_iter().collect(),
        };
        assert_eq!(rule.to_string(), "m 1,-1 2,8");
    }

    #[test]
    fn display_omits_full_month_list() {
        let rule = RecurrenceRule::Monthly {
            days: [MonthDay::Day(10)].into_iter().collect(),
            months: ALL_MONTHS.into_iter().collect(),
        };
        assert_eq!(rule.to_string(), "m 10");
    }

    #[test]
    fn canonical_text_parses_to_equal_rule() {
        for text in ["d 7", "y", "w 1,3,7", "m 1,15,-2 3,10", "m -1"] {
            let rule: RecurrenceRule = text.parse().unwrap();
            assert_eq!(rule.to_string(), text);
            assert_eq!(rule.to_string().parse::<RecurrenceRule>().unwrap(), rule);
        }
    }

    #[test]
    fn serde_uses_text_form() {
        let rule: RecurrenceRule = "w 5,1".parse().unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, "\"w 1,5\"");

        let back: RecurrenceRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn serde_rejects_invalid_text() {
        let err = serde_json::from_str::<RecurrenceRule>("\"d 0\"").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(RecurrenceRule::Yearly.kind(), RuleKind::Yearly);
        assert_eq!(RecurrenceRule::Daily { interval: 3 }.kind().to_string(), "daily");
    }

    #[test]
    fn validate_rejects_hand_built_rules() {
        assert!(RecurrenceRule::Daily { interval: 0 }.validate().is_err());
        assert!(RecurrenceRule::Weekly { days: BTreeSet::new() }.validate().is_err());
        assert_eq!(
            RecurrenceRule::Weekly { days: [8].into_iter().collect() }.validate(),
            Err(RecurrenceError::OutOfRange { param: Param::Weekday, value: 8 })
        );
        assert_eq!(
            RecurrenceRule::Monthly {
                days: [MonthDay::Day(32)].into_iter().collect(),
                months: [1].into_iter().collect(),
            }
            .validate(),
            Err(RecurrenceError::OutOfRange { param: Param::MonthDay, value: 32 })
        );
        assert!(RecurrenceRule::Monthly {
            days: [MonthDay::Last].into_iter().collect(),
            months: BTreeSet::new(),
        }
        .validate()
        .is_err());
    }

    #[test]
    fn parsed_rules_validate() {
        for text in ["d 400", "y", "w 1,7", "m 31,-1,-2 1,12"] {
            assert_eq!(text.parse::<RecurrenceRule>().unwrap().validate(), Ok(()));
        }
    }
}
