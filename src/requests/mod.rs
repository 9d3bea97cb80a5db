mod models;
mod store;

pub use models::{QueueStats, SongRequest, ANONYMOUS_REQUESTER};
pub use store::{RequestQueueStore, RequestStoreError};
