//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::RESOLVER_ATTEMPTS;
use crate::resolver::HickoryResolver;

/// Builds the resolver options used for blacklist queries.
///
/// The per-attempt timeout equals the configured DNS timeout; the lookup
/// coordinator adds its own one-second headroom on top. Search domains are
/// never appended (`ndots = 0`).
pub fn resolver_opts(timeout_seconds: u64) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(timeout_seconds.max(1));
    opts.attempts = RESOLVER_ATTEMPTS;
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver for blacklist lookups.
///
/// Uses hickory's default upstream configuration with the timeout taken from
/// the check configuration.
pub fn init_resolver(timeout_seconds: u64) -> Arc<HickoryResolver> {
    let resolver =
        TokioAsyncResolver::tokio(ResolverConfig::default(), resolver_opts(timeout_seconds));
    Arc::new(HickoryResolver::new(Arc::new(resolver)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_opts_timeout() {
        let opts = resolver_opts(5);
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.attempts, RESOLVER_ATTEMPTS);
        assert_eq!(opts.ndots, 0);
    }

    #[test]
    fn test_resolver_opts_zero_timeout_is_clamped() {
        assert_eq!(resolver_opts(0).timeout, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_init_resolver() {
        // Construction only; no queries are sent.
        let _resolver = init_resolver(3);
    }
}
