//! Configuration constants.
//!
//! This module defines the defaults and operational parameters used throughout
//! the application: timeouts, throttle rate, resolver tuning and exit codes.

use std::time::Duration;

/// Default path of the provider list file.
pub const DEFAULT_PROVIDER_FILE: &str = "./bl_list";

/// Default DNS timeout in seconds.
/// Each lookup unit gets `timeout + DEADLINE_HEADROOM` before it counts as timed out.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Default retry count. Accepted on the command line but not applied to lookups.
pub const DEFAULT_RETRIES: u32 = 2;

/// Default number of lookups dispatched per second (0 disables the throttle).
pub const DEFAULT_THROUGHPUT: u32 = 25;

/// Extra time granted on top of the configured DNS timeout for every lookup unit.
pub const DEADLINE_HEADROOM: Duration = Duration::from_secs(1);

/// Attempts made by the hickory resolver per query before it reports a failure.
pub const RESOLVER_ATTEMPTS: usize = 1;

/// Exit status used when the check cannot run at all
/// (unreadable provider file, unresolvable target).
pub const EXIT_FATAL: i32 = 155;

/// Highest exit status produced by [`crate::ExitPolicy::Count`].
pub const EXIT_COUNT_CAP: usize = 254;

/// Returns the per-unit deadline for a configured timeout.
pub fn lookup_deadline(timeout_seconds: u64) -> Duration {
    Duration::from_secs(timeout_seconds).saturating_add(DEADLINE_HEADROOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_deadline_adds_headroom() {
        assert_eq!(lookup_deadline(3), Duration::from_secs(4));
        assert_eq!(lookup_deadline(0), Duration::from_secs(1));
    }

    #[test]
    fn test_lookup_deadline_saturates() {
        assert_eq!(lookup_deadline(u64::MAX), Duration::MAX);
    }
}
