//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failure of a single resolver query.
///
/// Resolver implementations classify their failures into these three kinds;
/// the lookup coordinator maps them onto tally counters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name does not exist or has no records of the requested type (NXDOMAIN).
    #[error("no records found for {0}")]
    NotFound(String),

    /// The resolver gave up waiting for an answer.
    #[error("lookup of {0} timed out")]
    Timeout(String),

    /// Any other resolver failure (SERVFAIL, refused, malformed input, ...).
    #[error("lookup of {name} failed: {reason}")]
    Failed {
        /// The queried name
        name: String,
        /// Resolver-provided description
        reason: String,
    },
}

/// Errors raised while turning user input into a [`crate::CheckTarget`].
#[derive(Error, Debug)]
pub enum TargetError {
    /// Input is neither an IPv4 address nor a hostname.
    #[error("not a valid IPv4 address or hostname: {0}")]
    InvalidTarget(String),

    /// Forward lookup of the hostname failed.
    #[error("the lookup for the host {host} failed: {source}")]
    Unresolvable {
        /// Hostname supplied by the user
        host: String,
        /// Underlying resolver error
        #[source]
        source: LookupError,
    },

    /// Forward lookup returned more than one address.
    #[error("the lookup for the host {host} returned multiple IPs: {}", .addresses.join(", "))]
    AmbiguousHost {
        /// Hostname supplied by the user
        host: String,
        /// All returned addresses
        addresses: Vec<String>,
    },

    /// Forward lookup exceeded the deadline.
    #[error("the lookup for the host {host} timed out after {seconds} seconds")]
    Timeout {
        /// Hostname supplied by the user
        host: String,
        /// Deadline that elapsed, in seconds
        seconds: u64,
    },
}
