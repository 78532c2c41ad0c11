use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use relax_search::SearchTerm;
use serde::Deserialize;

use super::AppState;

pub(super) const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    #[serde(default)]
    pub what: String,
}

/// `GET /search?what=<term>`
///
/// An empty or missing `what` is answered with a bare `400` before any
/// catalog call. Otherwise the body is the rating-ordered array of
/// `{name, address, rating}`.
pub(super) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Ok(term) = SearchTerm::parse(&params.what) else {
        tracing::debug!("rejecting search with empty term");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let results = state.aggregator.search_term(&term).await;
    ([(header::CONTENT_TYPE, JSON_UTF8)], Json(results)).into_response()
}
