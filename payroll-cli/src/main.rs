use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use payroll_cli::cli::Cli;
use payroll_cli::commands::{self, CommandError};
use payroll_cli::{logging, render};
use payroll_data::AppConfig;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.policy_dir {
        config.policy.dir = Some(dir.clone());
    }

    logging::init(&config.logging.level, config.logging.file.as_deref())?;
    debug!(?config, "effective configuration");

    let policy = config.policy().context("Failed to load policy")?;

    match commands::execute(&cli.command, &policy) {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(CommandError::Invalid(messages)) => {
            warn!(count = messages.len(), "input rejected");
            eprintln!("Invalid input:");
            for message in &messages {
                eprintln!("  - {message}");
            }
            Ok(ExitCode::from(2))
        }
        Err(other) => Err(other.into()),
    }
}
