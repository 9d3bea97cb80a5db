//! Search proxy route for the request form autocomplete.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::itunes::SearchCandidate;

use super::state::{GuardedSearch, ServerState};

/// Queries shorter than this never reach the upstream catalog.
const MIN_QUERY_CHARS: usize = 2;

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchCandidate>,
}

/// Upstream failures never reach the caller; the form just shows no
/// suggestions.
async fn search_catalog(
    State(search): State<GuardedSearch>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Json(SearchResponse {
            results: Vec::new(),
        });
    }

    let results = match search.search(query).await {
        Ok(results) => results,
        Err(err) => {
            warn!("Catalog search for {:?} failed: {:#}", query, err);
            Vec::new()
        }
    };

    Json(SearchResponse { results })
}

pub fn make_search_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search", get(search_catalog))
        .with_state(state)
}
