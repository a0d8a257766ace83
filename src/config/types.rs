//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_PROVIDER_FILE, DEFAULT_RETRIES, DEFAULT_THROUGHPUT, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the process exit status is derived from the check result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExitPolicy {
    /// Exit with the number of listings (capped)
    Count,
    /// Exit with 1 when listed anywhere, 0 otherwise
    AnyListed,
}

/// Check configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library users.
///
/// # Examples
///
/// ```no_run
/// use blcheck::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     target: "192.0.2.10".to_string(),
///     blacklist: PathBuf::from("bl_list"),
///     throughput: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blcheck",
    version,
    about = "Checks an IP address or hostname against DNS and URI blacklist providers"
)]
pub struct Config {
    /// IPv4 address or hostname to check
    pub target: String,

    /// Provider list file
    #[arg(long, default_value = DEFAULT_PROVIDER_FILE)]
    pub blacklist: PathBuf,

    /// DNS timeout in seconds (each lookup gets one extra second of headroom)
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Retries for unsuccessful lookups (accepted for compatibility, currently not applied)
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Lookups dispatched per second (0 disables throttling)
    #[arg(long, default_value_t = DEFAULT_THROUGHPUT)]
    pub throughput: u32,

    /// Provider zone to skip; may be given multiple times
    #[arg(long = "disable", value_name = "ZONE")]
    pub disable: Vec<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit status policy
    #[arg(long, value_enum, default_value_t = ExitPolicy::Count)]
    pub exit_policy: ExitPolicy,

    /// Suppress all console output (report and logs); only the exit status remains
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    /// Log level actually applied: quiet mode turns logging off entirely.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Off
        } else {
            self.log_level.clone().into()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: String::new(),
            blacklist: PathBuf::from(DEFAULT_PROVIDER_FILE),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            throughput: DEFAULT_THROUGHPUT,
            disable: Vec::new(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            exit_policy: ExitPolicy::Count,
            quiet: false,
        }
    }
}
