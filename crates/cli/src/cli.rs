use clap::{Parser, Subcommand};

/// Next-date calculator for recurring tasks.
///
/// Evaluates repeat rules (`d <N>`, `y`, `w <days>`, `m <days> [months]`)
/// and applies the task-date policy used when tasks are saved or completed.
/// Dates are `YYYYMMDD`; `now`/`today` default to the local calendar date.
#[derive(Parser, Debug)]
#[command(name = "nextdate", version, about = "Next-date calculator for recurring tasks")]
pub struct CliArgs {
    /// Print JSON objects (`{"date": ...}` / `{"error": ...}`) instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Compute the next occurrence of a repeat rule after a task's date
    Next {
        /// Reference date (default: today)
        #[arg(long, env = "NEXTDATE_NOW")]
        now: Option<String>,

        /// The task's current date
        #[arg(long)]
        date: String,

        /// Repeat rule, e.g. "d 7" or "m 1,-1 2,8"
        #[arg(long)]
        repeat: String,
    },

    /// Validate a repeat rule and print its canonical form
    Check {
        /// Repeat rule text
        rule: String,
    },

    /// Resolve the date to store for a new or edited task
    Schedule {
        /// Requested date (empty = today)
        #[arg(long, default_value = "")]
        date: String,

        /// Repeat rule (empty = one-shot task)
        #[arg(long, default_value = "")]
        repeat: String,

        /// Override today's date
        #[arg(long, env = "NEXTDATE_TODAY")]
        today: Option<String>,
    },

    /// Decide what completing a task does: remove it or move it forward
    Done {
        /// The task's current date
        #[arg(long)]
        date: String,

        /// Repeat rule (empty = one-shot task)
        #[arg(long, default_value = "")]
        repeat: String,

        /// Override today's date
        #[arg(long, env = "NEXTDATE_TODAY")]
        today: Option<String>,
    },

    /// Print the active configuration
    Config,
}
