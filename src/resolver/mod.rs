//! DNS resolver capability.
//!
//! The lookup coordinator and target resolution talk to DNS only through the
//! [`BlacklistResolver`] trait:
//! - [`HickoryResolver`] queries real name servers via `hickory-resolver`
//! - [`StaticResolver`] answers from an in-memory table (tests, dry runs)

mod hickory;
mod static_resolver;

use async_trait::async_trait;

use crate::error_handling::LookupError;

pub use hickory::HickoryResolver;
pub use static_resolver::{QueryKind, RecordedQuery, StaticResolver};

/// Abstract resolver for mocking and switching implementations.
///
/// Deadlines are enforced by the caller; implementations may additionally
/// report their own timeouts as [`LookupError::Timeout`].
#[async_trait]
pub trait BlacklistResolver: Send + Sync {
    /// Returns the IPv4 addresses (A records) of `name` in textual form.
    async fn lookup_address(&self, name: &str) -> Result<Vec<String>, LookupError>;

    /// Returns the TXT records of `name`, one string per record.
    async fn lookup_text(&self, name: &str) -> Result<Vec<String>, LookupError>;

    /// Returns the PTR name of `address`.
    async fn reverse_lookup(&self, address: &str) -> Result<String, LookupError>;
}
