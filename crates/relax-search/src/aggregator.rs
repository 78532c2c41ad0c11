//! # Search Aggregator
//!
//! Fans one search term out to every configured location, joins all
//! outcomes, and orders the results by rating.
//!
//! Each location runs as its own task in a [`JoinSet`] on the shared
//! [`WorkerPool`]. A location that fails, times out, or cannot get a worker
//! contributes nothing; the others are unaffected. The returned order comes
//! from [`sort_by_rating_desc`] only, never from completion order.

use std::sync::Arc;
use std::time::Duration;

use relax_core::AppConfig;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

use crate::catalog::CatalogApi;
use crate::error::SearchError;
use crate::ordering::sort_by_rating_desc;
use crate::pool::{PoolMetrics, WorkerPool};
use crate::resolver::LocationResolver;
use crate::types::{LocationResult, SearchTerm};

/// Configuration for search aggregation.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Locations searched for every term, in configured order.
    pub locations: Vec<String>,
    /// Deadline for a whole fan-out, pool wait included.
    pub search_timeout: Duration,
}

impl AggregatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            locations: config.locations.clone(),
            search_timeout: config.search_timeout(),
        }
    }
}

/// Outcome of one location task: its position in the location list, the
/// location itself, and what the resolver produced.
type LocationOutcome = (usize, String, Result<Option<LocationResult>, SearchError>);

pub struct Aggregator {
    resolver: Arc<LocationResolver>,
    pool: Arc<WorkerPool>,
    locations: Arc<[String]>,
    search_timeout: Duration,
}

impl Aggregator {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        pool: Arc<WorkerPool>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            resolver: Arc::new(LocationResolver::new(catalog)),
            pool,
            locations: config.locations.into(),
            search_timeout: config.search_timeout,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    #[must_use]
    pub fn pool_metrics(&self) -> PoolMetrics {
        self.pool.metrics()
    }

    /// Validates `term` and searches every configured location.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] for an empty term, before
    /// any remote call is made. Per-location failures are never returned.
    pub async fn search(&self, term: &str) -> Result<Vec<LocationResult>, SearchError> {
        let term = SearchTerm::parse(term)?;
        Ok(self.search_term(&term).await)
    }

    /// Searches every configured location for an already validated term.
    ///
    /// Waits for all locations, bounded by the search timeout, and returns
    /// the resolved ones sorted by rating, highest first. Dropping the
    /// returned future aborts the in-flight location tasks.
    pub async fn search_term(&self, term: &SearchTerm) -> Vec<LocationResult> {
        if self.locations.is_empty() {
            tracing::debug!(term = %term, "no locations configured; nothing to search");
            return Vec::new();
        }

        let started = Instant::now();
        let deadline = started + self.search_timeout;
        let timeout_ms = u64::try_from(self.search_timeout.as_millis()).unwrap_or(u64::MAX);

        let mut tasks: JoinSet<LocationOutcome> = JoinSet::new();
        for (index, location) in self.locations.iter().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let pool = Arc::clone(&self.pool);
            let term = term.clone();
            let location = location.clone();

            tasks.spawn(async move {
                let work = pool.run(resolver.resolve(&term, &location));
                let outcome = match timeout_at(deadline, work).await {
                    Ok(Ok(resolved)) => resolved,
                    Ok(Err(pool_err)) => Err(pool_err),
                    Err(_) => Err(SearchError::TimedOut {
                        location: location.clone(),
                        timeout_ms,
                    }),
                };
                (index, location, outcome)
            });
        }

        // Slots keep results in location order so that equal ratings come
        // out the same way on every run.
        let mut slots: Vec<Option<LocationResult>> = vec![None; self.locations.len()];
        let mut failed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(Some(result)))) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(result);
                    }
                }
                Ok((_, location, Ok(None))) => {
                    tracing::debug!(location = %location, "no rated firm found");
                }
                Ok((_, location, Err(e))) => {
                    failed += 1;
                    tracing::warn!(location = %location, error = %e, "location search failed");
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(error = %e, "location task did not complete");
                }
            }
        }

        let mut results: Vec<LocationResult> = slots.into_iter().flatten().collect();
        sort_by_rating_desc(&mut results);

        let pool = self.pool.metrics();
        tracing::info!(
            term = %term,
            locations = self.locations.len(),
            resolved = results.len(),
            failed,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            pool_active = pool.active,
            pool_queued = pool.queued,
            "search completed"
        );

        results
    }
}
