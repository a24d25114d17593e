//! Shared building blocks for next-date evaluation: the calendar date type
//! with its `YYYYMMDD` codec, the error taxonomy, and environment config.

pub mod config;
pub mod date;
pub mod error;

pub use config::{Config, EvaluatorConfig};
pub use date::*;
pub use error::*;
