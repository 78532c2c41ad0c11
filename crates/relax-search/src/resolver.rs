//! Picks the result for a single location.
//!
//! The catalog already sorts firms by rating, but it cannot tell which of
//! them actually carry one. The resolver walks the page in order and
//! enriches only firms that have reviews; the first with a positive rating
//! wins, even if a later firm would rate higher.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::CatalogApi;
use crate::error::SearchError;
use crate::types::{LocationResult, SearchTerm};

pub struct LocationResolver {
    catalog: Arc<dyn CatalogApi>,
}

impl LocationResolver {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    /// Resolves the best rated firm for `term` in `location`.
    ///
    /// Returns `Ok(None)` when the search page is empty or no reviewed firm
    /// has a positive rating.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Catalog`] if the search call or any profile
    /// call fails. Nothing is retried.
    pub async fn resolve(
        &self,
        term: &SearchTerm,
        location: &str,
    ) -> Result<Option<LocationResult>, SearchError> {
        let started = Instant::now();
        let candidates = self.catalog.search_firms(term.as_str(), location).await?;

        let mut enriched = 0usize;
        let mut found = None;
        for candidate in &candidates {
            let Some(reviews_count) = candidate.reviews_count else {
                continue;
            };
            let Some(id) = candidate.id.as_deref() else {
                tracing::warn!(
                    location,
                    name = candidate.name.as_deref().unwrap_or_default(),
                    "reviewed firm has no id; skipping"
                );
                continue;
            };

            tracing::debug!(location, firm_id = id, reviews_count, "fetching firm rating");
            enriched += 1;
            let rating = self.catalog.firm_rating(id).await?;

            if let Some(value) = rating.positive_value() {
                found = Some(LocationResult::new(
                    location,
                    candidate.name.as_deref().unwrap_or_default(),
                    candidate.address.as_deref().unwrap_or_default(),
                    value,
                ));
                break;
            }
        }

        tracing::debug!(
            location,
            candidates = candidates.len(),
            enriched,
            resolved = found.is_some(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "location resolved"
        );
        Ok(found)
    }
}
