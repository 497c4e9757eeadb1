//! Run configuration.
//!
//! The binary fills this from command-line flags that fall back to the
//! `BASE_URL`, `CANDIDATE_ID` and `REQUESTS_PER_SECOND` environment variables.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default request ceiling. The service answers 429 above roughly one request per second.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 1.0;

/// Default number of dispatcher workers.
pub const DEFAULT_WORKERS: usize = 8;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Base URL does not parse or cannot carry paths.
    #[error("invalid base URL {url}: {message}")]
    BaseUrl {
        /// The rejected value.
        url: String,
        /// Parser message.
        message: String,
    },
    /// Candidate id is empty.
    #[error("CANDIDATE_ID not set")]
    MissingCandidateId,
    /// Request rate is not a positive finite number.
    #[error("invalid requests per second {0}")]
    RequestRate(f64),
    /// Worker count is zero.
    #[error("worker count must be at least 1")]
    Workers,
    /// Request timeout is zero.
    #[error("request timeout must be greater than zero")]
    Timeout,
}

/// Validated configuration shared by the transport and the dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `https://challenge.example.com/`.
    pub base_url: Url,
    /// Candidate owning the map.
    pub candidate_id: String,
    /// Ceiling on request starts per second, across all workers.
    pub requests_per_second: f64,
    /// Dispatcher worker threads.
    pub workers: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, the candidate id is
    /// empty, the rate is not positive and finite, or `workers` or `timeout`
    /// is zero.
    pub fn new(
        base_url: &str,
        candidate_id: &str,
        requests_per_second: f64,
        workers: usize,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let candidate_id = candidate_id.trim();
        if candidate_id.is_empty() {
            return Err(ConfigError::MissingCandidateId);
        }
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(ConfigError::RequestRate(requests_per_second));
        }
        if workers == 0 {
            return Err(ConfigError::Workers);
        }
        if timeout.is_zero() {
            return Err(ConfigError::Timeout);
        }

        Ok(Self {
            base_url,
            candidate_id: candidate_id.to_string(),
            requests_per_second,
            workers,
            timeout,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::BaseUrl {
        url: raw.to_string(),
        message,
    };
    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be a base".to_string()));
    }
    // Relative joins replace the last segment unless the path ends in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
