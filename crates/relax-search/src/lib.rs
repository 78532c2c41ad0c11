//! Concurrent "best rated firm per location" search.
//!
//! [`Aggregator::search`] fans a term out to every configured location on a
//! shared bounded [`WorkerPool`], resolves each location with
//! [`LocationResolver`], and returns the results ordered by rating.

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod ordering;
pub mod pool;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod test_support;

pub use aggregator::{Aggregator, AggregatorConfig};
pub use catalog::CatalogApi;
pub use error::SearchError;
pub use ordering::sort_by_rating_desc;
pub use pool::{PoolConfig, PoolMetrics, WorkerPool};
pub use resolver::LocationResolver;
pub use types::{LocationResult, SearchTerm};
