use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

/// Positive integer setting; zero and garbage fall back to the default.
fn profiled_env_positive_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub evaluator: EvaluatorConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `NEXTDATE_PROFILE` env var. When set (e.g. `TEST`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("NEXTDATE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        let evaluator = EvaluatorConfig::from_env_profiled(p);
        debug!(
            profile = p,
            window_years = evaluator.monthly_window_years,
            limit_years = evaluator.monthly_search_limit_years,
            "evaluator config resolved"
        );
        Self {
            profile: p.to_string(),
            evaluator,
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Overview suitable for printing or logging.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "evaluator": {
                "monthly_window_years": self.evaluator.monthly_window_years,
                "monthly_search_limit_years": self.evaluator.monthly_search_limit_years,
            },
        })
    }
}

// ── Evaluator ─────────────────────────────────────────────────

/// Default span of years enumerated per monthly search window.
pub const DEFAULT_MONTHLY_WINDOW_YEARS: u32 = 5;

/// Default number of years past `max(now, last_date)` the monthly search may reach.
pub const DEFAULT_MONTHLY_SEARCH_LIMIT_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Years enumerated per monthly window, starting at the year of the last date.
    pub monthly_window_years: u32,
    /// Hard cap for widening the monthly window before giving up.
    pub monthly_search_limit_years: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            monthly_window_years: DEFAULT_MONTHLY_WINDOW_YEARS,
            monthly_search_limit_years: DEFAULT_MONTHLY_SEARCH_LIMIT_YEARS,
        }
    }
}

impl EvaluatorConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            monthly_window_years: profiled_env_positive_u32(
                p,
                "NEXTDATE_MONTHLY_WINDOW_YEARS",
                DEFAULT_MONTHLY_WINDOW_YEARS,
            ),
            monthly_search_limit_years: profiled_env_positive_u32(
                p,
                "NEXTDATE_MONTHLY_SEARCH_LIMIT_YEARS",
                DEFAULT_MONTHLY_SEARCH_LIMIT_YEARS,
            ),
        }
    }
}
