//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own in-memory queue.

use super::constants::*;
use song_request_server::config::ItunesSettings;
use song_request_server::itunes::ItunesSearchClient;
use song_request_server::requests::RequestQueueStore;
use song_request_server::server::state::{GuardedRequestStore, GuardedSearch};
use song_request_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Upstream settings pointing at a port nothing listens on, so searches
/// exercise the fail-open path instead of reaching the real catalog.
fn unreachable_itunes_settings() -> ItunesSettings {
    ItunesSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
        ..ItunesSettings::default()
    }
}

/// Test server instance with an isolated request queue
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Queue store handle for direct seeding and inspection in tests
    pub request_store: GuardedRequestStore,

    // Private field - keep the shutdown channel alive until drop
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port.
    ///
    /// The search proxy is wired to an unreachable upstream, which is fine
    /// for every test that does not stub its own provider.
    pub async fn spawn() -> Self {
        let search = ItunesSearchClient::new(&unreachable_itunes_settings())
            .expect("Failed to build search client");
        Self::spawn_with_search(Arc::new(search)).await
    }

    /// Spawns a new test server using the given search provider.
    pub async fn spawn_with_search(search: GuardedSearch) -> Self {
        let request_store: GuardedRequestStore = Arc::new(Mutex::new(RequestQueueStore::new()));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };

        let app = make_app(config, request_store.clone(), search);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            request_store,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    // Server is ready
                    return;
                }
                _ => {
                    // Server not ready yet, wait and retry
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
