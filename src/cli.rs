//! Command-line parsing.
//!
//! The binary takes exactly two positional arguments: the App Store
//! application identifier and the webhook URL. No flags are defined.

use crate::{NotifierError, Result};

/// Usage line printed for `--help` and on argument errors.
pub const USAGE: &str = "usage: appreview-notifier <app-id> <webhook-url>";

/// Validated arguments for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// App Store application identifier.
    pub app_id: String,
    /// Destination webhook URL.
    pub webhook_url: String,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the pipeline.
    Run(CliArgs),
    /// Print usage and exit.
    Help,
}

/// Parse arguments, excluding the program name.
///
/// Arguments after the second positional are ignored. `--` ends option
/// scanning; any other argument starting with `-` is rejected.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut positionals = Vec::new();
    let mut options_done = false;

    for arg in args {
        let arg: String = arg.into();
        if !options_done && arg.len() > 1 && arg.starts_with('-') {
            match arg.as_str() {
                "--" => options_done = true,
                "-h" | "--help" => return Ok(Command::Help),
                other => {
                    return Err(NotifierError::Validation(format!(
                        "flag provided but not defined: {other}"
                    )))
                }
            }
            continue;
        }
        // Options are only recognized before the first positional.
        options_done = true;
        positionals.push(arg);
    }

    let mut positionals = positionals.into_iter();
    let app_id = positionals.next().unwrap_or_default();
    let webhook_url = positionals.next().unwrap_or_default();

    if app_id.is_empty() {
        return Err(NotifierError::Validation("id is empty".to_string()));
    }
    if webhook_url.is_empty() {
        return Err(NotifierError::Validation("webhook URL is empty".to_string()));
    }
    validate_webhook_url(&webhook_url)?;

    Ok(Command::Run(CliArgs {
        app_id,
        webhook_url,
    }))
}

/// Check that a webhook URL is an absolute http(s) URL with a host.
pub fn validate_webhook_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url)
        .map_err(|e| NotifierError::Validation(format!("invalid webhook URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(NotifierError::Validation(format!(
                "unsupported webhook URL scheme: {scheme}"
            )));
        }
    }

    if parsed.host().is_none() {
        return Err(NotifierError::Validation(
            "webhook URL has no host".to_string(),
        ));
    }

    Ok(())
}
