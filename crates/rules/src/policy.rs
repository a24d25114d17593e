//! Task-date policy applied by task handlers around the evaluator.
//!
//! - On create/update, a missing date means today, and a date in the past is
//!   moved forward: to today for one-shot tasks, to the next occurrence for
//!   recurring ones.
//! - On completion, one-shot tasks are removed and recurring tasks are
//!   rescheduled to their next occurrence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use nextdate_core::{format_date, parse_date, Date, Result};

use crate::evaluator::Evaluator;
use crate::parser;

/// What to do with a task once it is marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum Completion {
    /// The task has no repeat rule and should be deleted.
    Remove,
    /// The task stays, moved to the given `YYYYMMDD` date.
    Reschedule(String),
}

/// Date to store for a task being created or updated.
///
/// A non-empty `repeat` is validated even when the date needs no adjustment,
/// so a task is never stored with a rule that would fail on completion.
pub fn resolve_task_date(
    evaluator: &Evaluator,
    today: Date,
    date: &str,
    repeat: &str,
) -> Result<String> {
    let recurring = !repeat.trim().is_empty();
    if recurring {
        parser::validate(repeat)?;
    }

    if date.trim().is_empty() {
        return format_date(today);
    }

    let current = parse_date(date)?;
    if current >= today {
        return format_date(current);
    }

    if recurring {
        let next = evaluator.evaluate_at(today, date, repeat)?;
        debug!(date = %date, next = %next, repeat = %repeat, "moved past task date forward");
        Ok(next)
    } else {
        format_date(today)
    }
}

/// Decide what marking a task done does to it.
pub fn complete_task(
    evaluator: &Evaluator,
    today: Date,
    date: &str,
    repeat: &str,
) -> Result<Completion> {
    if repeat.trim().is_empty() {
        // Still reject a corrupt stored date.
        parse_date(date)?;
        return Ok(Completion::Remove);
    }

    let next = evaluator.evaluate_at(today, date, repeat)?;
    debug!(date = %date, next = %next, repeat = %repeat, "rescheduled completed task");
    Ok(Completion::Reschedule(next))
}
