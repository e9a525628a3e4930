//! HTTP client for the bookmark entry endpoint.
//!
//! The entry API returns one entry's complete bookmark batch in a single
//! `GET /entry/jsonlite/?url=<encoded page url>` response; there is no
//! pagination and the client performs no retries. The thread builder never
//! calls this module itself — callers fetch a snapshot and hand its bookmarks
//! to [`crate::threading::build_forest`].

use log::{debug, info};
use reqwest::{Client, StatusCode};
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::models::EntrySnapshot;

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_duration_millis(key: &str, default_millis: u64) -> Duration {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or_else(|| Duration::from_millis(default_millis))
}

/// Configuration for the entry API client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env_string("HATEBU_API_BASE", "https://b.hatena.ne.jp"),
            request_timeout: env_duration_millis("HATEBU_FETCH_TIMEOUT_MS", 10_000),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Errors that occur while fetching an entry snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("entry HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("entry endpoint returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("entry payload decode error: {0}")]
    Decode(reqwest::Error),
}

/// Client for the jsonlite entry endpoint.
#[derive(Debug, Clone)]
pub struct EntryClient {
    base_url: String,
    http: Client,
}

impl EntryClient {
    /// Build a client from configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetch the full bookmark batch for one page URL.
    ///
    /// The page URL goes into the `url` query parameter; percent-encoding is
    /// handled by the HTTP client.
    pub async fn fetch_entry(&self, page_url: &str) -> Result<EntrySnapshot, FetchError> {
        let endpoint = format!("{}/entry/jsonlite/", self.base_url);
        debug!("fetching entry snapshot for {}", page_url);

        let response = self
            .http
            .get(&endpoint)
            .query(&[("url", page_url)])
            .send()
            .await
            .map_err(FetchError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(FetchError::Status { status, body });
        }

        let snapshot: EntrySnapshot = response.json().await.map_err(FetchError::Decode)?;
        info!(
            "fetched {} bookmarks for {}",
            snapshot.bookmarks.len(),
            page_url
        );

        Ok(snapshot)
    }
}
