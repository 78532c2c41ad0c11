use relax_catalog::CatalogError;
use thiserror::Error;

/// Errors raised while searching.
///
/// Only [`SearchError::EmptyTerm`] ever reaches a caller of
/// [`crate::Aggregator::search`]; every other variant is scoped to a single
/// location and absorbed as "no result" for it.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search term must not be empty")]
    EmptyTerm,

    #[error("catalog call failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("no worker became available within {waited_ms} ms")]
    PoolExhausted { waited_ms: u64 },

    #[error("location \"{location}\" did not finish within {timeout_ms} ms")]
    TimedOut { location: String, timeout_ms: u64 },
}
