//! One notifier run: fetch, filter, notify.

use tracing::info;

use crate::cli::{validate_webhook_url, CliArgs};
use crate::config::Config;
use crate::datetime::{cutoff, Clock};
use crate::notify::WebhookNotifier;
use crate::review::{select_recent, ReviewFetcher};
use crate::{NotifierError, Result};

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries returned by the feed.
    pub fetched: usize,
    /// Entries inside the recency window.
    pub selected: usize,
    /// Messages the webhook accepted.
    pub posted: usize,
    /// Messages that could not be delivered.
    pub failed: usize,
}

/// Run the pipeline once.
///
/// The cutoff is taken from `clock` a single time before any entry is
/// examined. Fetch, decode and rating format failures abort the run; how
/// delivery failures are handled depends on `notify.fail_fast`.
pub async fn run(args: &CliArgs, config: &Config, clock: &dyn Clock) -> Result<RunSummary> {
    if args.app_id.is_empty() {
        return Err(NotifierError::Validation("id is empty".to_string()));
    }
    validate_webhook_url(&args.webhook_url)?;

    let fetcher = ReviewFetcher::new(&config.feed)?;
    let notifier = WebhookNotifier::new(args.webhook_url.as_str(), &config.notify)?;

    let entries = fetcher.fetch(&args.app_id).await?;
    info!(app_id = %args.app_id, count = entries.len(), "fetched reviews");

    let cutoff = cutoff(
        clock,
        config.filter.lookback_months,
        config.filter.lookback_days,
    );
    info!(%cutoff, "recency cutoff");

    let recent = select_recent(&entries, cutoff);
    let selected = recent.len();
    info!(selected, "reviews inside recency window");

    let outcome = notifier.notify_all(recent).await?;

    Ok(RunSummary {
        fetched: entries.len(),
        selected,
        posted: outcome.posted,
        failed: outcome.failed,
    })
}
