//! Customer review feed fetcher.
//!
//! Issues one GET against the store's review feed for an application and
//! decodes the JSON body into [`ReviewEntry`] values.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::FeedConfig;
use crate::review::types::{FeedResponse, ReviewEntry};
use crate::{NotifierError, Result};

/// User agent string for feed fetching.
const USER_AGENT: &str = concat!("appreview-notifier/", env!("CARGO_PKG_VERSION"));

/// Review feed fetcher.
pub struct ReviewFetcher {
    client: Client,
    base_url: String,
    country: String,
    sort_by: String,
    max_feed_size: u64,
}

impl ReviewFetcher {
    /// Create a fetcher from feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NotifierError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            sort_by: config.sort_by.clone(),
            max_feed_size: config.max_feed_size_bytes,
        })
    }

    /// Feed URL for an application identifier.
    pub fn feed_url(&self, app_id: &str) -> String {
        format!(
            "{}/{}/rss/customerreviews/id={}/sortBy={}/json",
            self.base_url,
            self.country,
            urlencoding::encode(app_id),
            self.sort_by
        )
    }

    /// Fetch and decode the reviews for an application.
    ///
    /// Entries come back in feed order.
    pub async fn fetch(&self, app_id: &str) -> Result<Vec<ReviewEntry>> {
        if app_id.is_empty() {
            return Err(NotifierError::Validation("id is empty".to_string()));
        }

        let url = self.feed_url(app_id);
        debug!(%url, "fetching review feed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NotifierError::Transport(format!("failed to fetch feed: {e}")))?;

        if !response.status().is_success() {
            return Err(NotifierError::Transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(NotifierError::Transport(format!(
                    "feed too large: {} bytes (max {} bytes)",
                    content_length, self.max_feed_size
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NotifierError::Transport(format!("failed to read response: {e}")))?;

        if bytes.len() as u64 > self.max_feed_size {
            return Err(NotifierError::Transport(format!(
                "feed too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_feed_size
            )));
        }

        parse_entries(&bytes)
    }
}

/// Decode a feed body into its entries.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<ReviewEntry>> {
    let response: FeedResponse = serde_json::from_slice(bytes)
        .map_err(|e| NotifierError::Decode(format!("failed to parse feed: {e}")))?;
    Ok(response.feed.entry)
}
