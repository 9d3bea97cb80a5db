//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all song-request-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Server Endpoints
    // ========================================================================

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Request Queue Endpoints
    // ========================================================================

    /// GET /v1/requests, optionally with a `filter` query parameter
    pub async fn list_requests(&self, filter: Option<&str>) -> Response {
        let mut request = self.client.get(format!("{}/v1/requests", self.base_url));
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter)]);
        }
        request.send().await.expect("List request failed")
    }

    /// POST /v1/requests with an arbitrary JSON payload
    pub async fn create_request(&self, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/requests", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Create request failed")
    }

    /// POST /v1/requests with the usual submission fields
    pub async fn submit(
        &self,
        song_name: &str,
        artist_name: Option<&str>,
        requested_by: Option<&str>,
    ) -> Response {
        self.create_request(json!({
            "song_name": song_name,
            "artist_name": artist_name,
            "requested_by": requested_by,
        }))
        .await
    }

    /// PATCH /v1/requests/{id}
    pub async fn set_played(&self, id: &str, played: bool) -> Response {
        self.client
            .patch(format!("{}/v1/requests/{}", self.base_url, id))
            .json(&json!({ "played": played }))
            .send()
            .await
            .expect("Update request failed")
    }

    /// DELETE /v1/requests/{id}
    pub async fn delete_request(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/v1/requests/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete request failed")
    }

    /// POST /v1/requests/clear
    pub async fn clear(&self, target: &str) -> Response {
        self.client
            .post(format!("{}/v1/requests/clear", self.base_url))
            .json(&json!({ "target": target }))
            .send()
            .await
            .expect("Clear request failed")
    }

    // ========================================================================
    // Search Endpoint
    // ========================================================================

    /// GET /v1/search?q=...
    pub async fn search(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/v1/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await
            .expect("Search request failed")
    }
}
