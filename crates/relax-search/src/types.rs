use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A validated, non-empty search term, kept exactly as the caller gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Rejects an empty `raw`; anything else, whitespace included, is kept
    /// verbatim and sent to the catalog as is.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] for an empty term.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        if raw.is_empty() {
            return Err(SearchError::EmptyTerm);
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best rated firm found for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub name: String,
    /// `"<location>, <firm address>"`.
    pub address: String,
    /// Always finite and strictly positive.
    pub rating: f64,
}

impl LocationResult {
    #[must_use]
    pub fn new(location: &str, name: &str, address: &str, rating: f64) -> Self {
        Self {
            name: name.to_owned(),
            address: format!("{location}, {address}"),
            rating,
        }
    }
}
