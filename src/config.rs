//! Configuration module for the review notifier.

use serde::Deserialize;
use std::path::Path;

use crate::{NotifierError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "APPREVIEW_CONFIG";

/// Config file read when `APPREVIEW_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "appreview.toml";

/// Review feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Scheme and host of the review feed.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Store region segment of the feed path.
    #[serde(default = "default_country")]
    pub country: String,
    /// Sort order segment of the feed path.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum feed size in bytes.
    #[serde(default = "default_max_feed_size")]
    pub max_feed_size_bytes: u64,
}

fn default_base_url() -> String {
    "https://itunes.apple.com".to_string()
}

fn default_country() -> String {
    "jp".to_string()
}

fn default_sort_by() -> String {
    "mostRecent".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_feed_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country: default_country(),
            sort_by: default_sort_by(),
            connect_timeout_secs: default_connect_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_feed_size_bytes: default_max_feed_size(),
        }
    }
}

/// Recency window configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Calendar months subtracted from now.
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,
    /// Calendar days subtracted from now.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_lookback_months() -> u32 {
    1
}

fn default_lookback_days() -> u32 {
    1
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            lookback_months: default_lookback_months(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Webhook notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Token repeated once per rating point.
    #[serde(default = "default_rating_glyph")]
    pub rating_glyph: String,
    /// Abort the run on the first failed POST instead of moving on.
    #[serde(default)]
    pub fail_fast: bool,
    /// Total request timeout in seconds.
    #[serde(default = "default_notify_timeout")]
    pub timeout_secs: u64,
}

fn default_rating_glyph() -> String {
    ":star:".to_string()
}

fn default_notify_timeout() -> u64 {
    30
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            rating_glyph: default_rating_glyph(),
            fail_fast: false,
            timeout_secs: default_notify_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; empty means stderr only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Review feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Recency window configuration.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Webhook configuration.
    #[serde(default)]
    pub notify: NotifyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(NotifierError::Io)?;
        Self::parse(&content)
    }

    /// Resolve and load the configuration for a run.
    ///
    /// Uses the file named by `APPREVIEW_CONFIG` when set (it must exist),
    /// otherwise `appreview.toml` if present, otherwise defaults. Environment
    /// overrides are applied and the result is validated.
    pub fn discover() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path)?,
            _ if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| NotifierError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `APPREVIEW_LOG_LEVEL`: Override the log level
    /// - `APPREVIEW_FEED_BASE_URL`: Override the feed base URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("APPREVIEW_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(base_url) = std::env::var("APPREVIEW_FEED_BASE_URL") {
            if !base_url.is_empty() {
                self.feed.base_url = base_url;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.feed.base_url).map_err(|e| {
            NotifierError::Config(format!("invalid feed.base_url {:?}: {e}", self.feed.base_url))
        })?;
        if self.feed.country.is_empty() {
            return Err(NotifierError::Config("feed.country is empty".to_string()));
        }
        if self.feed.sort_by.is_empty() {
            return Err(NotifierError::Config("feed.sort_by is empty".to_string()));
        }
        if self.feed.connect_timeout_secs == 0
            || self.feed.total_timeout_secs == 0
            || self.notify.timeout_secs == 0
        {
            return Err(NotifierError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
