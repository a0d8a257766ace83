//! Concurrent provider lookups.
//!
//! [`run_lookups`] dispatches one Tokio task per provider, spacing the
//! dispatches with a fixed-interval [`Throttle`], and waits for every task
//! before returning the aggregated [`RunTally`].
//!
//! Only dispatch is serialized. Once launched, tasks run fully in parallel and
//! finish in any order; each task owns a deadline of `timeout + 1` seconds
//! measured from its own dispatch.

mod task;
mod tally;
mod throttle;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tokio::time::Instant;

use crate::config::{lookup_deadline, DEFAULT_THROUGHPUT, DEFAULT_TIMEOUT_SECS};
use crate::provider::ProviderDescriptor;
use crate::resolver::BlacklistResolver;
use crate::target::CheckTarget;

pub use task::build_query_name;
pub use tally::{LookupOutcome, OutcomeKind, RunTally, SharedTally};
pub use throttle::Throttle;

use task::{process_provider_task, LookupTaskParams};

/// Progress callback, invoked with `(completed, total)` after each provider finishes.
pub type ProgressCallback = Option<Arc<dyn Fn(usize, usize) + Send + Sync>>;

/// Timing parameters of a lookup run.
#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    /// Configured DNS timeout in seconds; each lookup gets one extra second
    pub timeout_seconds: u64,
    /// Maximum dispatches per second; 0 disables throttling
    pub throughput_per_second: u32,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            throughput_per_second: DEFAULT_THROUGHPUT,
        }
    }
}

impl LookupOptions {
    /// Time budget of one lookup unit.
    pub fn deadline(&self) -> Duration {
        lookup_deadline(self.timeout_seconds)
    }
}

/// Checks `target` against every provider and returns the aggregated tally.
///
/// Providers are dispatched in order, no faster than
/// `options.throughput_per_second`. The call returns once every dispatched
/// lookup has finished. Invalid descriptors (empty zone) must be filtered out
/// by the caller beforehand.
pub async fn run_lookups(
    target: &CheckTarget,
    providers: &[ProviderDescriptor],
    resolver: Arc<dyn BlacklistResolver>,
    options: LookupOptions,
    progress_callback: ProgressCallback,
) -> RunTally {
    let tally = Arc::new(SharedTally::new());
    let target = Arc::new(target.clone());
    let total = providers.len();
    let budget = options.deadline();
    let mut throttle = Throttle::new(options.throughput_per_second);
    let mut tasks = FuturesUnordered::new();

    debug!(
        "Dispatching {} lookups for {} (interval {:?}, deadline {:?})",
        total,
        target.ip,
        throttle.interval(),
        budget
    );

    for provider in providers {
        throttle.wait().await;

        let params = LookupTaskParams {
            provider: Arc::new(provider.clone()),
            target: Arc::clone(&target),
            resolver: Arc::clone(&resolver),
            tally: Arc::clone(&tally),
            deadline: unit_deadline(budget),
        };
        let tally_for_progress = Arc::clone(&tally);
        let progress = progress_callback.clone();
        tasks.push(tokio::spawn(async move {
            let outcome = process_provider_task(params).await;
            if let Some(callback) = progress {
                callback(tally_for_progress.completed(), total);
            }
            outcome
        }));
    }

    while let Some(task_result) = tasks.next().await {
        if let Err(join_error) = task_result {
            warn!("Lookup task panicked: {:?}", join_error);
        }
    }

    tally.snapshot()
}

/// Deadline of a unit dispatched now. Budgets too large to represent are
/// clamped to a point roughly thirty years ahead.
fn unit_deadline(budget: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(budget)
        .unwrap_or_else(|| now + FAR_FUTURE)
}

const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);
