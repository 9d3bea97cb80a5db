use anyhow::Result;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tower_http::services::ServeDir;

use crate::requests::{QueueStats, RequestQueueStore, RequestStoreError, SongRequest};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, make_search_routes, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub queue: QueueStats,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize)]
struct ListParams {
    filter: Option<String>,
}

#[derive(Serialize)]
struct ListRequestsResponse {
    requests: Vec<SongRequest>,
    stats: QueueStats,
}

#[derive(Deserialize, Debug)]
struct CreateRequestBody {
    pub song_name: String,
    pub artist_name: Option<String>,
    pub requested_by: Option<String>,
    pub artwork: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UpdateRequestBody {
    pub played: bool,
}

#[derive(Deserialize, Debug)]
struct ClearRequestsBody {
    pub target: String,
}

#[derive(Serialize)]
struct ClearRequestsResponse {
    cleared: usize,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        queue: state.request_store.lock().unwrap().stats(),
    };
    Json(stats)
}

async fn list_requests(
    State(store): State<GuardedRequestStore>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = store.lock().unwrap();
    let requests = match params.filter.as_deref() {
        Some("pending") => store.list_pending(),
        Some("played") => store.list_played(),
        _ => store.list_all(),
    };
    Json(ListRequestsResponse {
        requests,
        stats: store.stats(),
    })
    .into_response()
}

async fn create_request(
    State(store): State<GuardedRequestStore>,
    Json(body): Json<CreateRequestBody>,
) -> Response {
    match store.lock().unwrap().add(
        &body.song_name,
        body.artist_name.as_deref(),
        body.requested_by.as_deref(),
        body.artwork.as_deref(),
    ) {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(err @ RequestStoreError::EmptySongName) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
    }
}

async fn update_request(
    State(store): State<GuardedRequestStore>,
    Path(id): Path<String>,
    Json(body): Json<UpdateRequestBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    let updated = if body.played {
        store.mark_played(&id)
    } else {
        store.mark_unplayed(&id)
    };
    match updated {
        Some(request) => Json(request).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_request(
    State(store): State<GuardedRequestStore>,
    Path(id): Path<String>,
) -> Response {
    match store.lock().unwrap().delete(&id) {
        true => StatusCode::OK.into_response(),
        false => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn clear_requests(
    State(store): State<GuardedRequestStore>,
    Json(body): Json<ClearRequestsBody>,
) -> Response {
    let cleared = match body.target.as_str() {
        "played" => store.lock().unwrap().clear_played(),
        "all" => store.lock().unwrap().clear_all(),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Unknown clear target: {:?}", other),
            )
                .into_response()
        }
    };
    Json(ClearRequestsResponse { cleared }).into_response()
}

pub fn make_app(
    config: ServerConfig,
    request_store: GuardedRequestStore,
    search: GuardedSearch,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        request_store,
        search,
    };

    let request_routes: Router = Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route("/requests/clear", post(clear_requests))
        .route(
            "/requests/{id}",
            patch(update_request).delete(delete_request),
        )
        .with_state(state.clone());

    let api_routes = request_routes.merge(make_search_routes(state.clone()));

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    request_store: RequestQueueStore,
    search: GuardedSearch,
    config: ServerConfig,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, Arc::new(Mutex::new(request_store)), search);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
