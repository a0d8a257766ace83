//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `blcheck` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting (suppressed by `--quiet`)
//! - Exit status selection
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use blcheck::app::{evaluate_exit_code, print_report};
use blcheck::config::EXIT_FATAL;
use blcheck::initialization::{init_logger_with, init_resolver};
use blcheck::{run_check_with, Config, ProgressCallback};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let progress: ProgressCallback = Some(Arc::new(|completed, total| {
        log::debug!("Progress: {completed}/{total} providers checked");
    }));

    let resolver = init_resolver(config.timeout_seconds);
    match run_check_with(&config, resolver, progress).await {
        Ok(report) => {
            if !config.quiet {
                println!();
                print_report(&report, config.timeout_seconds);
            }
            process::exit(evaluate_exit_code(config.exit_policy, &report.tally));
        }
        Err(e) => {
            if !config.quiet {
                eprintln!("blcheck error: {:#}", e);
            }
            process::exit(EXIT_FATAL);
        }
    }
}
