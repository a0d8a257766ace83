//! blcheck library: DNS and URI blacklist checking
//!
//! This library checks whether an IPv4 address or hostname is listed on a
//! configurable set of DNS-based (DNSBL/DNSWL) and URI-based (URIBL) providers.
//! Every provider zone is queried concurrently, with dispatches throttled to a
//! fixed rate and every lookup bounded by a deadline.
//!
//! # Example
//!
//! ```no_run
//! use blcheck::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     target: "192.0.2.10".to_string(),
//!     blacklist: std::path::PathBuf::from("bl_list"),
//!     ..Default::default()
//! };
//!
//! let report = run_check(&config).await?;
//! println!("Listed on {} of {} providers", report.tally.listed, report.provider_count);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod lookup;
pub mod provider;
pub mod resolver;
pub mod target;

// Re-export public API
pub use config::{Config, ExitPolicy, LogFormat, LogLevel};
pub use error_handling::{LookupError, TargetError};
pub use lookup::{run_lookups, LookupOptions, LookupOutcome, ProgressCallback, RunTally};
pub use provider::{parse_providers, ProviderDescriptor, ProviderKind};
pub use resolver::{BlacklistResolver, HickoryResolver, StaticResolver};
pub use run::{run_check, run_check_with, CheckReport};
pub use target::CheckTarget;

// Internal run module (contains the end-to-end check)
mod run {
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{debug, info, warn};

    use crate::config::{lookup_deadline, Config};
    use crate::initialization::init_resolver;
    use crate::lookup::{run_lookups, LookupOptions, ProgressCallback, RunTally};
    use crate::provider::{load_providers, ProviderDescriptor};
    use crate::resolver::BlacklistResolver;
    use crate::target::{resolve_target, CheckTarget};

    /// Result of a blacklist check.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// The checked target
        pub target: CheckTarget,
        /// PTR name of a bare IP target, if known
        pub ptr: Option<String>,
        /// Number of usable providers (including disabled ones)
        pub provider_count: usize,
        /// Provider lines that could not be parsed
        pub ignored_providers: usize,
        /// Aggregated outcome
        pub tally: RunTally,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a check with the production DNS resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be resolved or the provider list
    /// cannot be read. Individual provider failures never fail the check.
    pub async fn run_check(config: &Config) -> Result<CheckReport> {
        let resolver = init_resolver(config.timeout_seconds);
        run_check_with(config, resolver, None).await
    }

    /// Runs a check with the given resolver and optional progress callback.
    ///
    /// # Errors
    ///
    /// See [`run_check`].
    pub async fn run_check_with(
        config: &Config,
        resolver: Arc<dyn BlacklistResolver>,
        progress_callback: ProgressCallback,
    ) -> Result<CheckReport> {
        let start_time = std::time::Instant::now();

        debug!(
            "Timeout {}s, throughput {}/s, retries {} (not applied)",
            config.timeout_seconds, config.throughput, config.retries
        );

        let resolved = resolve_target(
            &config.target,
            resolver.as_ref(),
            lookup_deadline(config.timeout_seconds),
        )
        .await
        .context("Failed to resolve check target")?;
        let target = resolved.target;
        info!("Checking IP: {}", target.ip);

        let parsed = load_providers(&config.blacklist).await?;
        let parsed_count = parsed.len();
        let mut providers: Vec<ProviderDescriptor> =
            parsed.into_iter().filter(|p| p.is_valid()).collect();
        let ignored_providers = parsed_count - providers.len();
        if ignored_providers > 0 {
            warn!("Ignored {ignored_providers} unparseable provider line(s)");
        }

        apply_disabled(&mut providers, &config.disable);
        info!("Checking {} providers", providers.len());

        let options = LookupOptions {
            timeout_seconds: config.timeout_seconds,
            throughput_per_second: config.throughput,
        };
        let tally = run_lookups(&target, &providers, resolver, options, progress_callback).await;

        Ok(CheckReport {
            target,
            ptr: resolved.ptr,
            provider_count: providers.len(),
            ignored_providers,
            tally,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Deactivates every provider whose zone is listed in `disabled`.
    pub(crate) fn apply_disabled(providers: &mut [ProviderDescriptor], disabled: &[String]) {
        for zone in disabled {
            let mut matched = false;
            for provider in providers.iter_mut().filter(|p| p.url.eq_ignore_ascii_case(zone)) {
                provider.active = false;
                matched = true;
            }
            if !matched {
                warn!("--disable {zone} does not match any provider");
            }
        }
    }

}
