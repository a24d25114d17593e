mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use nextdate_core::config::{load_dotenv, Config};
use nextdate_rules::Evaluator;

use crate::cli::CliArgs;
use crate::commands::{run, Response};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();
    info!(profile = %config.profile_label(), "loaded config");

    let evaluator = Evaluator::new(&config.evaluator);
    match run(&args.command, &evaluator, &config) {
        Ok(outcome) => {
            let text = if args.json {
                outcome.to_json()?
            } else {
                outcome.to_text()?
            };
            println!("{text}");
            Ok(())
        }
        Err(err) if args.json => {
            println!("{}", serde_json::to_string(&Response::error(&err))?);
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}
