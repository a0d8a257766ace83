//! Error handling.
//!
//! Typed errors for the three places the check can fail:
//! - initialization (logger setup)
//! - individual resolver queries
//! - resolving the user-supplied target
//!
//! Per-provider lookup failures never abort a run; they are folded into the
//! tally by the lookup coordinator.

mod types;

// Re-export public API
pub use types::{InitializationError, LookupError, TargetError};
