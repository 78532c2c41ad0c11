//! The narrow catalog contract the resolver depends on.

use async_trait::async_trait;
use relax_catalog::{Candidate, CatalogClient, CatalogError, Rating};

/// Remote operations needed to resolve one location.
///
/// Implemented by [`CatalogClient`]; tests substitute in-memory stubs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// First page of firms for `what` in `location`, in response order.
    async fn search_firms(&self, what: &str, location: &str)
        -> Result<Vec<Candidate>, CatalogError>;

    /// Rating of firm `id` from its profile.
    async fn firm_rating(&self, id: &str) -> Result<Rating, CatalogError>;
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn search_firms(
        &self,
        what: &str,
        location: &str,
    ) -> Result<Vec<Candidate>, CatalogError> {
        CatalogClient::search_firms(self, what, location).await
    }

    async fn firm_rating(&self, id: &str) -> Result<Rating, CatalogError> {
        CatalogClient::firm_rating(self, id).await
    }
}
