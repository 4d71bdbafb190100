//! appreview-notifier
//!
//! Polls the App Store customer review feed for one application and posts
//! reviews from roughly the last month to a chat webhook, one message per
//! review. Designed for periodic invocation by an external scheduler.

pub mod cli;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod review;

pub use cli::{parse_args, CliArgs, Command};
pub use config::Config;
pub use datetime::{Clock, FixedClock, SystemClock};
pub use error::{NotifierError, Result};
pub use notify::{BlockMessage, NotifyOutcome, WebhookNotifier};
pub use pipeline::{run, RunSummary};
pub use review::{ReviewEntry, ReviewFetcher};
