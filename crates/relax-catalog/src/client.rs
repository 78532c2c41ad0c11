//! HTTP client for the catalog REST API.
//!
//! Wraps `reqwest` with API key and version management and typed response
//! deserialization. Only the first result page is ever requested.

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::rating::Rating;
use crate::types::{Candidate, ProfileResponse, SearchResponse};

const DEFAULT_BASE_URL: &str = "http://catalog.api.2gis.ru/";

/// Firms requested per search call. Only page 1 is fetched.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Client for the catalog REST API.
///
/// Use [`CatalogClient::new`] for production or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    api_key: String,
    api_version: String,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a new client pointed at the production catalog API.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            api_key,
            api_version,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a new client with a custom base URL.
    ///
    /// `timeout_secs` bounds every single remote call, connect included.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash keeps `Url::join` appending endpoint names
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_version: api_version.to_owned(),
            base_url,
        })
    }

    /// Searches firms matching `what` in `location`, best rated first.
    ///
    /// Returns the first page only. A response without a `result` list is
    /// treated as an empty page.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure, timeout or non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body is not the expected JSON.
    pub async fn search_firms(
        &self,
        what: &str,
        location: &str,
    ) -> Result<Vec<Candidate>, CatalogError> {
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let url = self.build_url(
            "search",
            &[
                ("what", what),
                ("where", location),
                ("sort", "rating"),
                ("pagesize", &page_size),
                ("page", "1"),
            ],
        )?;

        let response: SearchResponse = self
            .request_json(&url, &format!("search(what={what}, where={location})"))
            .await?;

        Ok(response.result.unwrap_or_default())
    }

    /// Fetches the profile of firm `id` and extracts its rating.
    ///
    /// An absent or unparsable rating is not an error; it comes back as
    /// [`Rating`] with `value: None`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure, timeout or non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body is not the expected JSON.
    pub async fn firm_rating(&self, id: &str) -> Result<Rating, CatalogError> {
        let url = self.build_url("profile", &[("id", id)])?;
        let profile: ProfileResponse = self
            .request_json(&url, &format!("profile(id={id})"))
            .await?;
        Ok(Rating::from_profile(id, &profile))
    }

    /// Builds an endpoint URL with `version`, `key` and the extra query
    /// parameters, all percent-encoded.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let mut url =
            self.base_url
                .join(endpoint)
                .map_err(|e| CatalogError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("version", &self.api_version);
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] on network failure or a non-2xx status.
    /// Returns [`CatalogError::Deserialize`] if the body does not parse.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let started = Instant::now();
        // The request URL carries the API key; keep it out of error text.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.without_url()))?;
        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.without_url()))?;
        tracing::debug!(
            context,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "catalog call completed"
        );
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
