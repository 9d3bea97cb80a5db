use axum::extract::FromRef;

use crate::itunes::CatalogSearch;
use crate::requests::RequestQueueStore;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedRequestStore = Arc<Mutex<RequestQueueStore>>;
pub type GuardedSearch = Arc<dyn CatalogSearch>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub request_store: GuardedRequestStore,
    pub search: GuardedSearch,
}

impl FromRef<ServerState> for GuardedRequestStore {
    fn from_ref(input: &ServerState) -> Self {
        input.request_store.clone()
    }
}

impl FromRef<ServerState> for GuardedSearch {
    fn from_ref(input: &ServerState) -> Self {
        input.search.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
