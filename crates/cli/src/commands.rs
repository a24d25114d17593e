use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use nextdate_core::{parse_date, Config, Date};
use nextdate_rules::{complete_task, resolve_task_date, Completion, Evaluator, RecurrenceRule};

use crate::cli::Command;

/// Result of a command, printable as text or JSON.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Date(String),
    Rule(RecurrenceRule),
    Completion(Completion),
    Config(serde_json::Value),
}

/// JSON shape of every response; absent fields are omitted.
#[derive(Debug, Default, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn error(err: &anyhow::Error) -> Self {
        Self {
            error: Some(format!("{err:#}")),
            ..Self::default()
        }
    }
}

impl Outcome {
    pub fn to_text(&self) -> Result<String> {
        Ok(match self {
            Outcome::Date(date) => date.clone(),
            Outcome::Rule(rule) => rule.to_string(),
            Outcome::Completion(Completion::Remove) => "remove".to_string(),
            Outcome::Completion(Completion::Reschedule(date)) => date.clone(),
            Outcome::Config(value) => serde_json::to_string_pretty(value)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let value = match self {
            Outcome::Date(date) => serde_json::to_value(Response {
                date: Some(date.clone()),
                ..Response::default()
            })?,
            Outcome::Rule(rule) => serde_json::json!({
                "rule": rule.to_string(),
                "kind": rule.kind(),
            }),
            Outcome::Completion(Completion::Remove) => serde_json::to_value(Response {
                action: Some("remove"),
                ..Response::default()
            })?,
            Outcome::Completion(Completion::Reschedule(date)) => serde_json::to_value(Response {
                date: Some(date.clone()),
                action: Some("reschedule"),
                ..Response::default()
            })?,
            Outcome::Config(value) => value.clone(),
        };
        Ok(serde_json::to_string(&value)?)
    }
}

fn today_or(flag: Option<&str>, name: &str) -> Result<Date> {
    match flag {
        Some(text) => parse_date(text).with_context(|| format!("invalid --{name}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn run(command: &Command, evaluator: &Evaluator, config: &Config) -> Result<Outcome> {
    debug!(?command, "running command");
    let outcome = match command {
        Command::Next { now, date, repeat } => {
            let now = today_or(now.as_deref(), "now")?;
            Outcome::Date(evaluator.evaluate_at(now, date, repeat)?)
        }
        Command::Check { rule } => Outcome::Rule(rule.parse()?),
        Command::Schedule { date, repeat, today } => {
            let today = today_or(today.as_deref(), "today")?;
            Outcome::Date(resolve_task_date(evaluator, today, date, repeat)?)
        }
        Command::Done { date, repeat, today } => {
            let today = today_or(today.as_deref(), "today")?;
            Outcome::Completion(complete_task(evaluator, today, date, repeat)?)
        }
        Command::Config => Outcome::Config(config.summary()),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(command: Command) -> Result<Outcome> {
        run(&command, &Evaluator::default(), &Config::default())
    }

    #[test]
    fn next_prints_date() {
        let out = exec(Command::Next {
            now: Some("20240304".into()),
            date: "20240301".into(),
            repeat: "w 1,3".into(),
        })
        .unwrap();
        assert_eq!(out.to_text().unwrap(), "20240306");
        assert_eq!(out.to_json().unwrap(), r#"{"date":"20240306"}"#);
    }

    #[test]
    fn next_reports_bad_now_with_context() {
        let err = exec(Command::Next {
            now: Some("tomorrow".into()),
            date: "20240301".into(),
            repeat: "d 1".into(),
        })
        .unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "invalid --now: invalid date 'tomorrow', expected YYYYMMDD"
        );
    }

    #[test]
    fn check_prints_canonical_rule() {
        let out = exec(Command::Check { rule: "m 15,1 10,3".into() }).unwrap();
        assert_eq!(out.to_text().unwrap(), "m 1,15 3,10");
        assert_eq!(out.to_json().unwrap(), r#"{"kind":"monthly","rule":"m 1,15 3,10"}"#);
    }

    #[test]
    fn check_surfaces_validation_error() {
        let err = exec(Command::Check { rule: "d 500".into() }).unwrap_err();
        let json = serde_json::to_string(&Response::error(&err)).unwrap();
        assert_eq!(
            json,
            r#"{"error":"interval in days 500 is out of range, expected 1..=400"}"#
        );
    }

    #[test]
    fn done_without_repeat_removes() {
        let out = exec(Command::Done {
            date: "20240315".into(),
            repeat: String::new(),
            today: Some("20240315".into()),
        })
        .unwrap();
        assert_eq!(out.to_text().unwrap(), "remove");
        assert_eq!(out.to_json().unwrap(), r#"{"action":"remove"}"#);
    }

    #[test]
    fn done_with_repeat_reschedules() {
        let out = exec(Command::Done {
            date: "20240315".into(),
            repeat: "y".into(),
            today: Some("20240315".into()),
        })
        .unwrap();
        assert_eq!(
            out.to_json().unwrap(),
            r#"{"action":"reschedule","date":"20250315"}"#
        );
    }

    #[test]
    fn schedule_moves_past_date() {
        let out = exec(Command::Schedule {
            date: "20240101".into(),
            repeat: String::new(),
            today: Some("20240315".into()),
        })
        .unwrap();
        assert_eq!(out, Outcome::Date("20240315".into()));
    }

    #[test]
    fn config_prints_summary() {
        let out = exec(Command::Config).unwrap();
        assert!(out.to_text().unwrap().contains("monthly_window_years"));
    }
}
