//! Song request data models

use serde::{Deserialize, Serialize};

/// Placeholder shown when a patron submits without a name.
pub const ANONYMOUS_REQUESTER: &str = "Anonimo";

/// A single song request in the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRequest {
    pub id: String,
    pub song_name: String,
    pub artist_name: Option<String>,
    /// Artwork URL picked from the search results, carried through unmodified.
    pub artwork: Option<String>,
    pub requested_by: String,
    /// Epoch milliseconds, set at creation and never changed.
    pub requested_at: i64,
    pub played: bool,
    /// Epoch milliseconds, present exactly while `played` is true.
    pub played_at: Option<i64>,
}

/// Aggregate queue counts reported alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub played: usize,
}
