//! reqwest-backed [`CompendiumSource`].
//!
//! Every endpoint answers with the same envelope:
//!
//! ```text
//! GET {base}                    → { status, message, data: [Entry] }
//! GET {base}/category/{name}    → { status, message, data: [Entry] }
//! GET {base}/entry/{name}       → { status, message, data: Entry }
//! ```
//!
//! The envelope `status` decides success, not the HTTP status line.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::source::{ApiError, CompendiumSource};
use super::types::{Entry, Envelope};

pub struct HttpSource {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Transport(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!("{} answered HTTP {}", url, response.status());

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        if envelope.status != 200 {
            warn!(
                "Compendium error from {}: {} {}",
                url, envelope.status, envelope.message
            );
            return Err(ApiError::Application {
                status: envelope.status,
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Parse("envelope has no data".to_string()))
    }
}

#[async_trait]
impl CompendiumSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self) -> Result<Vec<Entry>, ApiError> {
        let entries: Vec<Entry> = self.get(self.endpoint(&[])).await?;
        info!("Fetched {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<Entry>, ApiError> {
        let entries: Vec<Entry> = self.get(self.endpoint(&["category", category])).await?;
        info!("Fetched {} entries in category '{}'", entries.len(), category);
        Ok(entries)
    }

    async fn fetch_entry(&self, name: &str) -> Result<Entry, ApiError> {
        self.get(self.endpoint(&["entry", name])).await
    }
}
