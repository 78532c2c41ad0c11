//! Catalog API response types.
//!
//! Every field is optional on the wire. Missing keys and explicit `null`
//! both deserialize to `None`.

use serde::Deserialize;

/// Body of the `search` endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: Option<Vec<Candidate>>,
}

/// A single firm from a search response, before rating enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Only firms carrying this field are considered for enrichment.
    #[serde(default)]
    pub reviews_count: Option<i64>,
}

/// Body of the `profile` endpoint.
///
/// `rating` is documented as a string-encoded decimal; it is kept as a raw
/// JSON value so a plain number is accepted too.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
}
