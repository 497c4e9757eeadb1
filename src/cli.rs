//! CLI command implementations for Megaverse.

pub(crate) mod plan;
pub(crate) mod run;
pub(crate) mod show;

mod output;

use clap::ValueEnum;
use megaverse::config::{self, ClientConfig, ConfigError};
use megaverse::dispatch::DispatchError;
use megaverse::reconcile::ReconcileError;
use megaverse::{ApiError, Dispatcher, HttpApi};
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Connection settings, each overridable from the environment.
#[derive(clap::Args, Debug)]
pub(crate) struct ServiceArgs {
    /// Service root URL
    #[arg(long, env = "BASE_URL")]
    base_url: String,

    /// Candidate identifier owning the map
    #[arg(long, env = "CANDIDATE_ID")]
    candidate_id: String,

    /// Ceiling on requests started per second
    #[arg(long, env = "REQUESTS_PER_SECOND", default_value_t = config::DEFAULT_REQUESTS_PER_SECOND)]
    requests_per_second: f64,

    /// Concurrent worker threads
    #[arg(short = 'j', long, env = "MEGAVERSE_WORKERS", default_value_t = config::DEFAULT_WORKERS)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "MEGAVERSE_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

impl ServiceArgs {
    /// Validate the settings and build the transport and dispatcher.
    pub(crate) fn connect(&self) -> Result<(HttpApi, Dispatcher), CliError> {
        let config = ClientConfig::new(
            &self.base_url,
            &self.candidate_id,
            self.requests_per_second,
            self.workers,
            Duration::from_secs(self.timeout),
        )?;
        let api = HttpApi::new(&config)?;
        let dispatcher = Dispatcher::from_config(&config)?;
        Ok((api, dispatcher))
    }
}

/// Output format for the `run` and `plan` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// State rendered by the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowTarget {
    /// The current map.
    Map,
    /// The goal.
    Goal,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<DispatchError> for CliError {
    fn from(e: DispatchError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ReconcileError> for CliError {
    fn from(e: ReconcileError) -> Self {
        Self::new(e.to_string())
    }
}

/// Serialize a value as pretty JSON.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))
}
