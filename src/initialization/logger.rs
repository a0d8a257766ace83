//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

const CRATE_TARGET: &str = "blcheck";
const CRATE_MODULE_PREFIX: &str = "blcheck::";

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with one of two line shapes: plain text (emoji,
/// colored level, message) or one JSON object per record.
///
/// The logger reads from the `RUST_LOG` environment variable first; the
/// provided `level` overrides it. `LevelFilter::Off` silences every module.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show every lookup outcome
/// blcheck 192.0.2.1 --log-level debug
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=blcheck=debug,hickory_resolver=info blcheck 192.0.2.1
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    // RUST_LOG must not re-enable output when logging is switched off
    let mut builder = if level == LevelFilter::Off {
        env_logger::Builder::new()
    } else {
        env_logger::Builder::from_default_env()
    };

    builder.filter_level(level);
    // Truncated or malformed UDP answers are handled by hickory itself
    builder.filter_module("hickory_proto", level.min(LevelFilter::Error));
    builder.filter_module("hickory_resolver", level.min(LevelFilter::Warn));
    builder.filter_module(CRATE_TARGET, level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let line = plain_line(record.level(), record.target(), &record.args().to_string());
                writeln!(buf, "{line}")
            });
        }
    }

    // try_init so repeated initialization in tests does not panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per record: `{"ts":<millis>,"level":..,"target":..,"msg":..}`.
fn json_line(timestamp_millis: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": timestamp_millis,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

/// Emoji, colored level and message. Records from dependencies also name
/// their module; the crate's own records do not.
fn plain_line(level: Level, target: &str, message: &str) -> String {
    let (emoji, colored_level) = match level {
        Level::Error => ("❌", level.as_str().red()),
        Level::Warn => ("⚠️", level.as_str().yellow()),
        Level::Info => ("✔️", level.as_str().green()),
        Level::Debug => ("🔍", level.as_str().blue()),
        Level::Trace => ("🔬", level.as_str().purple()),
    };

    if target == CRATE_TARGET || target.starts_with(CRATE_MODULE_PREFIX) {
        format!("{emoji} {colored_level:<5} {message}")
    } else {
        format!("{emoji} {colored_level:<5} {} {message}", target.cyan())
    }
}
