//! Per-provider lookup unit.
//!
//! This module contains the logic for checking one provider, including the
//! disabled/skipped short-circuits, the deadline-bound address lookup, result
//! filtering, and the best-effort TXT lookup for listings.

use std::sync::Arc;

use log::{debug, info};
use tokio::time::Instant;

use super::tally::{LookupOutcome, OutcomeKind, SharedTally};
use crate::error_handling::LookupError;
use crate::provider::{ProviderDescriptor, ProviderKind};
use crate::resolver::BlacklistResolver;
use crate::target::{reverse_octets, CheckTarget};

/// Everything one lookup unit needs.
pub struct LookupTaskParams {
    pub provider: Arc<ProviderDescriptor>,
    pub target: Arc<CheckTarget>,
    pub resolver: Arc<dyn BlacklistResolver>,
    pub tally: Arc<SharedTally>,
    pub deadline: Instant,
}

/// Builds the name queried for `provider`, or `None` when the provider cannot
/// be queried for this target (URI list without a hostname).
pub fn build_query_name(target: &CheckTarget, provider: &ProviderDescriptor) -> Option<String> {
    match provider.kind {
        ProviderKind::UriBlacklist => target
            .has_host()
            .then(|| format!("{}.{}", target.host, provider.url)),
        ProviderKind::DnsBlacklist | ProviderKind::DnsWhitelist => {
            Some(format!("{}.{}", reverse_octets(&target.ip), provider.url))
        }
    }
}

/// Checks a single provider and records the outcome in the shared tally.
pub async fn process_provider_task(params: LookupTaskParams) -> OutcomeKind {
    let LookupTaskParams {
        provider,
        target,
        resolver,
        tally,
        deadline,
    } = params;

    let outcome = check_provider(&provider, &target, resolver.as_ref(), &tally, deadline).await;
    if outcome != OutcomeKind::Listed {
        tally.increment(outcome);
    }
    debug!("{}: {}", provider.url, outcome);
    outcome
}

async fn check_provider(
    provider: &ProviderDescriptor,
    target: &CheckTarget,
    resolver: &dyn BlacklistResolver,
    tally: &SharedTally,
    deadline: Instant,
) -> OutcomeKind {
    if !provider.active {
        return OutcomeKind::Disabled;
    }

    let Some(query_name) = build_query_name(target, provider) else {
        return OutcomeKind::Skipped;
    };

    // The deadline wins over an answer that arrives in the same instant.
    let answer = tokio::select! {
        biased;
        _ = tokio::time::sleep_until(deadline) => return OutcomeKind::TimedOut,
        answer = resolver.lookup_address(&query_name) => answer,
    };

    let address = match answer {
        Ok(addresses) => match addresses.into_iter().next() {
            Some(address) => address,
            None => return OutcomeKind::NotListed,
        },
        Err(LookupError::Timeout(_)) => return OutcomeKind::TimedOut,
        Err(e) => {
            debug!("{query_name}: {e}");
            return OutcomeKind::NotListed;
        }
    };

    if provider.result_filter.is_match(&address) {
        debug!(
            "{query_name} answered {address}, matched by filter {}",
            provider.result_filter
        );
        return OutcomeKind::NotListed;
    }

    let txt_detail = lookup_txt_detail(resolver, &query_name, deadline).await;
    info!("Listed on {} with status {address}", provider.url);
    tally.record_listing(LookupOutcome {
        provider_url: provider.url.clone(),
        result_address: address,
        txt_detail,
    });
    OutcomeKind::Listed
}

/// Fetches the TXT records for a listing, joined by a single space.
/// Any failure yields an empty string.
async fn lookup_txt_detail(
    resolver: &dyn BlacklistResolver,
    query_name: &str,
    deadline: Instant,
) -> String {
    match tokio::time::timeout_at(deadline, resolver.lookup_text(query_name)).await {
        Ok(Ok(records)) => records.join(" "),
        Ok(Err(e)) => {
            debug!("No TXT detail for {query_name}: {e}");
            String::new()
        }
        Err(_) => {
            debug!("TXT lookup for {query_name} hit the deadline");
            String::new()
        }
    }
}
