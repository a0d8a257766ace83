//! Check target resolution.
//!
//! Turns the user-supplied IP address or hostname into a [`CheckTarget`] and
//! builds the query names sent to provider zones.

use std::net::Ipv4Addr;
use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, warn};
use regex::Regex;

use crate::error_handling::{LookupError, TargetError};
use crate::resolver::BlacklistResolver;

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}\.?$")
        .expect("hostname pattern is valid")
});

/// The subject of a check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckTarget {
    /// Dotted-quad IPv4 address being checked
    pub ip: String,
    /// Originating hostname; empty when the user supplied a bare IP
    pub host: String,
}

impl CheckTarget {
    /// Target for a bare IP address (no hostname context).
    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            host: String::new(),
        }
    }

    /// Target for a hostname and its forward-resolved address.
    pub fn from_host(host: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            host: host.into(),
        }
    }

    /// Whether the target carries a hostname.
    pub fn has_host(&self) -> bool {
        !self.host.is_empty()
    }
}

/// Reverses the dot-separated components of an address.
///
/// `1.2.3.4` becomes `4.3.2.1`. Input is not validated.
pub fn reverse_octets(ip: &str) -> String {
    ip.split('.').rev().collect::<Vec<_>>().join(".")
}

/// Returns true for a dotted-quad IPv4 address.
pub fn is_ipv4(input: &str) -> bool {
    input.parse::<Ipv4Addr>().is_ok()
}

/// Returns true for something shaped like a DNS hostname.
pub fn is_hostname(input: &str) -> bool {
    HOSTNAME.is_match(input)
}

/// Outcome of resolving user input.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// Target handed to the lookup coordinator
    pub target: CheckTarget,
    /// PTR name of a bare IP target, when the reverse lookup succeeded
    pub ptr: Option<String>,
}

/// Resolves user input into a [`CheckTarget`].
///
/// A bare IPv4 address is used as-is, with a best-effort PTR lookup for
/// display. A hostname must forward-resolve to exactly one address within
/// `deadline`.
///
/// # Errors
///
/// Returns a [`TargetError`] when the input is neither an address nor a
/// hostname, or when the hostname cannot be resolved to a single address.
pub async fn resolve_target(
    input: &str,
    resolver: &dyn BlacklistResolver,
    deadline: Duration,
) -> Result<ResolvedTarget, TargetError> {
    let input = input.trim();

    if is_ipv4(input) {
        let ptr = match tokio::time::timeout(deadline, resolver.reverse_lookup(input)).await {
            Ok(Ok(name)) => Some(name),
            Ok(Err(e)) => {
                debug!("No PTR record for {input}: {e}");
                None
            }
            Err(_) => {
                warn!("PTR lookup for {input} timed out");
                None
            }
        };
        return Ok(ResolvedTarget {
            target: CheckTarget::from_ip(input),
            ptr,
        });
    }

    if !is_hostname(input) {
        return Err(TargetError::InvalidTarget(input.to_string()));
    }

    let host = input.trim_end_matches('.');
    let addresses = match tokio::time::timeout(deadline, resolver.lookup_address(host)).await {
        Ok(Ok(addresses)) => addresses,
        Ok(Err(LookupError::Timeout(_))) | Err(_) => {
            return Err(TargetError::Timeout {
                host: host.to_string(),
                seconds: deadline.as_secs(),
            })
        }
        Ok(Err(source)) => {
            return Err(TargetError::Unresolvable {
                host: host.to_string(),
                source,
            })
        }
    };

    if addresses.len() > 1 {
        return Err(TargetError::AmbiguousHost {
            host: host.to_string(),
            addresses,
        });
    }

    match addresses.into_iter().next() {
        Some(ip) => {
            debug!("Resolved {host} to {ip}");
            Ok(ResolvedTarget {
                target: CheckTarget::from_host(host, ip),
                ptr: None,
            })
        }
        None => Err(TargetError::Unresolvable {
            host: host.to_string(),
            source: LookupError::NotFound(host.to_string()),
        }),
    }
}
