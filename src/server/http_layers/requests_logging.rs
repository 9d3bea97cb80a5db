//! Request logging middleware.
//!
//! Every payload on this API is a small JSON document, so body logging
//! buffers the whole thing up to a fixed cap and prints it on one line.

use axum::extract::State;
use axum::{
    body::Body,
    http::{header::CONTENT_LENGTH, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::info;

use crate::server::state::ServerState;

/// How much of each request to log, from nothing to full payloads.
#[derive(PartialEq, PartialOrd, Clone, Debug, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    Path,
    Headers,
    Body,
}

impl Default for RequestsLoggingLevel {
    fn default() -> Self {
        Self::Path
    }
}

/// Submissions and queue updates are a few hundred bytes; anything past this
/// is not one of ours and not worth printing.
const MAX_LOGGABLE_BODY_BYTES: usize = 4 * 1024;

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

pub async fn log_requests(
    State(state): State<ServerState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let level = state.config.requests_logging_level.clone();
    if level == RequestsLoggingLevel::None {
        return next.run(request).await;
    }

    info!(">>> {} {}", request.method(), request.uri());

    if level >= RequestsLoggingLevel::Headers {
        info!("  headers: {:?}", request.headers());
    }

    if level >= RequestsLoggingLevel::Body {
        // Listing and delete calls carry no payload, nothing to log there.
        match content_length(request.headers()) {
            None => {}
            Some(size) if size > MAX_LOGGABLE_BODY_BYTES => {
                info!(
                    "  payload: {:#}, too big to log",
                    byte_unit::Byte::from(size)
                );
            }
            Some(size) => {
                let (parts, body) = request.into_parts();
                let bytes = match axum::body::to_bytes(body, size).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        info!("  payload could not be read: {:?}", err);
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                };
                info!("  payload: {}", String::from_utf8_lossy(&bytes));
                request = Request::from_parts(parts, Body::from(bytes));
            }
        }
    }

    let start = Instant::now();
    let response = next.run(request).await;

    let response_size = content_length(response.headers()).unwrap_or(0);
    info!(
        "<<< {} ({}ms, {:#})",
        response.status().as_u16(),
        start.elapsed().as_millis(),
        byte_unit::Byte::from(response_size)
    );

    response
}
