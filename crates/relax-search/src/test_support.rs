//! In-memory catalog used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use relax_catalog::{Candidate, CatalogError, Rating};

use crate::catalog::CatalogApi;

pub(crate) fn firm(id: &str, name: &str, address: &str, reviews_count: Option<i64>) -> Candidate {
    Candidate {
        id: Some(id.to_owned()),
        name: Some(name.to_owned()),
        address: Some(address.to_owned()),
        reviews_count,
    }
}

pub(crate) fn simulated_failure(context: &str) -> CatalogError {
    let source = serde_json::from_str::<serde_json::Value>("<connection reset>").unwrap_err();
    CatalogError::Deserialize {
        context: context.to_owned(),
        source,
    }
}

enum SearchStub {
    Firms(Vec<Candidate>),
    Fail,
}

enum RatingStub {
    Value(Option<f64>),
    Fail,
}

/// Deterministic catalog keyed by location (search) and firm id (profile).
///
/// Unknown locations return no firms; unknown ids return no rating.
#[derive(Default)]
pub(crate) struct StubCatalog {
    searches: HashMap<String, SearchStub>,
    ratings: HashMap<String, RatingStub>,
    delays: HashMap<String, Duration>,
    search_calls: AtomicUsize,
    rating_calls: AtomicUsize,
    rated_ids: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_firms(mut self, location: &str, firms: Vec<Candidate>) -> Self {
        self.searches
            .insert(location.to_owned(), SearchStub::Firms(firms));
        self
    }

    pub(crate) fn with_failing_search(mut self, location: &str) -> Self {
        self.searches.insert(location.to_owned(), SearchStub::Fail);
        self
    }

    pub(crate) fn with_rating(mut self, id: &str, value: Option<f64>) -> Self {
        self.ratings
            .insert(id.to_owned(), RatingStub::Value(value));
        self
    }

    pub(crate) fn with_failing_rating(mut self, id: &str) -> Self {
        self.ratings.insert(id.to_owned(), RatingStub::Fail);
        self
    }

    /// Delays the search call for `location`.
    pub(crate) fn with_delay(mut self, location: &str, delay: Duration) -> Self {
        self.delays.insert(location.to_owned(), delay);
        self
    }

    /// Convenience: one location whose single reviewed firm has `rating`.
    pub(crate) fn with_rated_location(self, location: &str, rating: f64) -> Self {
        let id = format!("{location}-firm");
        self.with_firms(
            location,
            vec![firm(&id, &format!("Best of {location}"), "Main st, 1", Some(10))],
        )
        .with_rating(&id, Some(rating))
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn rating_calls(&self) -> usize {
        self.rating_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn rated_ids(&self) -> Vec<String> {
        self.rated_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for StubCatalog {
    async fn search_firms(
        &self,
        _what: &str,
        location: &str,
    ) -> Result<Vec<Candidate>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(location) {
            tokio::time::sleep(*delay).await;
        }
        match self.searches.get(location) {
            Some(SearchStub::Firms(firms)) => Ok(firms.clone()),
            Some(SearchStub::Fail) => Err(simulated_failure(location)),
            None => Ok(Vec::new()),
        }
    }

    async fn firm_rating(&self, id: &str) -> Result<Rating, CatalogError> {
        self.rating_calls.fetch_add(1, Ordering::SeqCst);
        self.rated_ids.lock().unwrap().push(id.to_owned());
        match self.ratings.get(id) {
            Some(RatingStub::Value(value)) => Ok(Rating {
                business_id: id.to_owned(),
                value: *value,
            }),
            Some(RatingStub::Fail) => Err(simulated_failure(id)),
            None => Ok(Rating {
                business_id: id.to_owned(),
                value: None,
            }),
        }
    }
}
