//! In-memory storage for the live request queue.
//!
//! The store owns the authoritative collection of song requests. Callers get
//! value copies; the only mutation paths are the explicit operations below.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::{QueueStats, SongRequest, ANONYMOUS_REQUESTER};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestStoreError {
    #[error("song name must not be empty")]
    EmptySongName,
}

/// The live queue of song requests, ordered by submission time.
///
/// Not-found outcomes surface as `None`/`false` rather than errors, so
/// callers decide how to report them.
#[derive(Debug, Default)]
pub struct RequestQueueStore {
    requests: Vec<SongRequest>,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl RequestQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests, ascending by submission time. Submissions within the
    /// same millisecond keep their insertion order.
    pub fn list_all(&self) -> Vec<SongRequest> {
        let mut requests = self.requests.clone();
        requests.sort_by_key(|r| r.requested_at);
        requests
    }

    /// The not-yet-played subset of `list_all`, same order.
    pub fn list_pending(&self) -> Vec<SongRequest> {
        self.list_all().into_iter().filter(|r| !r.played).collect()
    }

    /// The already-played subset of `list_all`, same order.
    pub fn list_played(&self) -> Vec<SongRequest> {
        self.list_all().into_iter().filter(|r| r.played).collect()
    }

    pub fn stats(&self) -> QueueStats {
        let played = self.requests.iter().filter(|r| r.played).count();
        QueueStats {
            total: self.requests.len(),
            pending: self.requests.len() - played,
            played,
        }
    }

    /// Create a new request and append it to the queue.
    ///
    /// All fields are trimmed. A blank `song_name` is rejected; a blank or
    /// missing `requested_by` falls back to the anonymous placeholder.
    pub fn add(
        &mut self,
        song_name: &str,
        artist_name: Option<&str>,
        requested_by: Option<&str>,
        artwork: Option<&str>,
    ) -> Result<SongRequest, RequestStoreError> {
        let song_name = song_name.trim();
        if song_name.is_empty() {
            return Err(RequestStoreError::EmptySongName);
        }

        let request = SongRequest {
            id: Uuid::new_v4().to_string(),
            song_name: song_name.to_string(),
            artist_name: trimmed_or_none(artist_name),
            artwork: trimmed_or_none(artwork),
            requested_by: trimmed_or_none(requested_by)
                .unwrap_or_else(|| ANONYMOUS_REQUESTER.to_string()),
            requested_at: now_millis(),
            played: false,
            played_at: None,
        };
        self.requests.push(request.clone());
        Ok(request)
    }

    /// Flag a request as played, stamping `played_at` with the current time.
    /// Re-marking an already-played request only refreshes the stamp.
    pub fn mark_played(&mut self, id: &str) -> Option<SongRequest> {
        let request = self.requests.iter_mut().find(|r| r.id == id)?;
        request.played = true;
        request.played_at = Some(now_millis());
        Some(request.clone())
    }

    /// Return a request to the pending state, clearing `played_at`.
    pub fn mark_unplayed(&mut self, id: &str) -> Option<SongRequest> {
        let request = self.requests.iter_mut().find(|r| r.id == id)?;
        request.played = false;
        request.played_at = None;
        Some(request.clone())
    }

    /// Remove a request. Reports whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.requests.iter().position(|r| r.id == id) {
            Some(index) => {
                self.requests.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every played request, leaving pending ones untouched.
    /// Returns how many entries were removed.
    pub fn clear_played(&mut self) -> usize {
        let before = self.requests.len();
        self.requests.retain(|r| !r.played);
        before - self.requests.len()
    }

    /// Drop the whole queue. Returns how many entries were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.requests.len();
        self.requests.clear();
        removed
    }
}
