//! Webhook notifier.
//!
//! Posts one block message per review, strictly one after another.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::NotifyConfig;
use crate::notify::message::{build_message, BlockMessage};
use crate::review::ReviewEntry;
use crate::{NotifierError, Result};

/// Counts from one notification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// Messages the webhook accepted.
    pub posted: usize,
    /// Messages that failed in transit or were rejected.
    pub failed: usize,
}

/// Sends review messages to a chat webhook.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    glyph: String,
    fail_fast: bool,
}

impl WebhookNotifier {
    /// Create a notifier posting to `url`.
    pub fn new(url: impl Into<String>, config: &NotifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifierError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            glyph: config.rating_glyph.clone(),
            fail_fast: config.fail_fast,
        })
    }

    /// POST a message to the webhook.
    ///
    /// A non-success status is reported as a transport error.
    pub async fn post(&self, message: &BlockMessage) -> Result<StatusCode> {
        let body = message.to_json()?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| NotifierError::Transport(format!("failed to post message: {e}")))?;

        let status = response.status();
        debug!(%status, "webhook responded");
        if !status.is_success() {
            return Err(NotifierError::Transport(format!(
                "webhook returned HTTP {status}"
            )));
        }
        Ok(status)
    }

    /// Notify about each entry in order.
    ///
    /// A rating that cannot be formatted aborts the pass. A failed POST is
    /// logged and the pass moves on to the next entry, unless the notifier
    /// was configured to fail fast.
    pub async fn notify_all<'a, I>(&self, entries: I) -> Result<NotifyOutcome>
    where
        I: IntoIterator<Item = &'a ReviewEntry>,
    {
        let mut outcome = NotifyOutcome::default();

        for entry in entries {
            let message = build_message(entry, &self.glyph)?;

            match self.post(&message).await {
                Ok(_) => outcome.posted += 1,
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => {
                    warn!(title = entry.title(), error = %e, "failed to post review");
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }
}
