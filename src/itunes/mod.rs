//! HTTP client for the iTunes Search API.
//!
//! Backs the autocomplete on the request form. Lookups go through the
//! `CatalogSearch` trait so the server can run against a stub in tests.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ItunesSettings;

/// A candidate match offered to the patron while typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: i64,
    pub song_name: String,
    pub artist_name: String,
    pub artwork: Option<String>,
}

/// External music catalog lookup.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>>;
}

/// Catalog lookup that always comes back empty. Used in tests and when the
/// upstream catalog is disabled.
pub struct NoopSearch;

#[async_trait]
impl CatalogSearch for NoopSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchCandidate>> {
        Ok(Vec::new())
    }
}

// Wire format of the iTunes Search API. Only the fields we use.

#[derive(Debug, Deserialize)]
struct ItunesSearchResponse {
    results: Vec<ItunesTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesTrack {
    track_id: i64,
    track_name: String,
    artist_name: String,
    #[serde(default)]
    artwork_url60: Option<String>,
    #[serde(default)]
    artwork_url100: Option<String>,
}

impl From<ItunesTrack> for SearchCandidate {
    fn from(track: ItunesTrack) -> Self {
        SearchCandidate {
            id: track.track_id,
            song_name: track.track_name,
            artist_name: track.artist_name,
            // The bigger artwork looks better on the form, fall back to small.
            artwork: track.artwork_url100.or(track.artwork_url60),
        }
    }
}

/// Client for the iTunes Search API.
#[derive(Clone)]
pub struct ItunesSearchClient {
    client: Client,
    base_url: String,
    country: String,
    limit: usize,
}

impl ItunesSearchClient {
    pub fn new(settings: &ItunesSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            country: settings.country.clone(),
            limit: settings.limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSearch for ItunesSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("term", query),
                ("entity", "song"),
                ("limit", &self.limit.to_string()),
                ("country", &self.country),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Search request failed with status: {}",
                response.status()
            ));
        }

        let search_response: ItunesSearchResponse = response.json().await?;
        Ok(search_response
            .results
            .into_iter()
            .map(SearchCandidate::from)
            .collect())
    }
}
