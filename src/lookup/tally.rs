//! Run tally tracking.
//!
//! This module provides thread-safe counters and the listing collection shared
//! by all in-flight lookup units of one run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Terminal state of one provider lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum OutcomeKind {
    /// Answer outside the provider's filter
    Listed,
    /// No answer, resolver error, or answer matched by the filter
    NotListed,
    /// Deadline elapsed before an answer
    TimedOut,
    /// URI provider without a hostname to query
    Skipped,
    /// Provider deactivated by configuration
    Disabled,
}

impl OutcomeKind {
    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Listed => "listed",
            OutcomeKind::NotListed => "not listed",
            OutcomeKind::TimedOut => "timeouts",
            OutcomeKind::Skipped => "skipped",
            OutcomeKind::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider that listed the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Provider zone
    pub provider_url: String,
    /// First address returned by the provider
    pub result_address: String,
    /// TXT records joined by a single space; empty if unavailable
    pub txt_detail: String,
}

/// Final counters and listings of a run.
///
/// `listings` is in completion order, not provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    /// Providers that listed the target
    pub listed: usize,
    /// Providers that did not list the target
    pub not_listed: usize,
    /// Lookups that hit the deadline
    pub timed_out: usize,
    /// URI providers skipped for lack of a hostname
    pub skipped: usize,
    /// Inactive providers
    pub disabled: usize,
    /// Details for every listing
    pub listings: Vec<LookupOutcome>,
}

impl RunTally {
    /// Returns the counter for `kind`.
    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Listed => self.listed,
            OutcomeKind::NotListed => self.not_listed,
            OutcomeKind::TimedOut => self.timed_out,
            OutcomeKind::Skipped => self.skipped,
            OutcomeKind::Disabled => self.disabled,
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> usize {
        OutcomeKind::iter().map(|kind| self.count(kind)).sum()
    }
}

/// Thread-safe tally shared by the lookup units of a single run.
///
/// Counters are atomics; listings are appended under a mutex. Every run owns
/// its own instance.
#[derive(Debug)]
pub struct SharedTally {
    counts: HashMap<OutcomeKind, AtomicUsize>,
    listings: Mutex<Vec<LookupOutcome>>,
}

impl Default for SharedTally {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedTally {
    /// Creates a tally with every counter at zero.
    pub fn new() -> Self {
        let counts = OutcomeKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        Self {
            counts,
            listings: Mutex::new(Vec::new()),
        }
    }

    /// Increments the counter for `kind`.
    pub fn increment(&self, kind: OutcomeKind) {
        if let Some(counter) = self.counts.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in SharedTally initialization.",
                kind
            );
        }
    }

    /// Counts a listing and records its details.
    pub fn record_listing(&self, outcome: LookupOutcome) {
        self.increment(OutcomeKind::Listed);
        self.listings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome);
    }

    /// Current value of the counter for `kind`.
    pub fn get(&self, kind: OutcomeKind) -> usize {
        self.counts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sum of all counters, i.e. the number of finished units.
    pub fn completed(&self) -> usize {
        OutcomeKind::iter().map(|kind| self.get(kind)).sum()
    }

    /// Copies the current state into a [`RunTally`].
    pub fn snapshot(&self) -> RunTally {
        RunTally {
            listed: self.get(OutcomeKind::Listed),
            not_listed: self.get(OutcomeKind::NotListed),
            timed_out: self.get(OutcomeKind::TimedOut),
            skipped: self.get(OutcomeKind::Skipped),
            disabled: self.get(OutcomeKind::Disabled),
            listings: self
                .listings
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
