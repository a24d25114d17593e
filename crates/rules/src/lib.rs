//! Recurrence rule engine for task scheduling.
//!
//! This crate provides:
//! - Rule text parsing and validation (`d <N>`, `y`, `w <days>`, `m <days> [months]`)
//! - The four date-advance strategies (daily, yearly, weekly, monthly)
//! - The [`Evaluator`], which turns `(now, last_date, rule)` into the next date
//! - The task-date policy applied on create, update and completion

pub mod evaluator;
pub mod parser;
pub mod policy;
pub mod rule;
pub mod strategy;

pub use evaluator::{evaluate, Evaluator};
pub use policy::{complete_task, resolve_task_date, Completion};
pub use rule::{MonthDay, RecurrenceRule, RuleKind};

pub use nextdate_core::{Param, RecurrenceError, Result};
