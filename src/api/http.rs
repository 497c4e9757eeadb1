//! HTTP transport over `reqwest`'s blocking client.

use log::debug;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};

use crate::api::{MegaverseApi, Method, Mutation};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::wire::{RawGoalResponse, RawMapResponse};

/// [`MegaverseApi`] backed by the real service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: Url,
    candidate_id: String,
    client: Client,
}

impl HttpApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            candidate_id: config.candidate_id.clone(),
            client,
        })
    }

    /// Resolve a path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::Url {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        debug!("GET {url}");
        let response = self.client.get(url).send()?;
        expect_ok(response.status())?;
        Ok(response)
    }
}

impl MegaverseApi for HttpApi {
    fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    fn fetch_map(&self) -> Result<RawMapResponse, ApiError> {
        let path = format!("api/map/{}", self.candidate_id);
        let response = self.get(&path)?;
        response
            .json::<RawMapResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn fetch_goal(&self) -> Result<RawGoalResponse, ApiError> {
        let path = format!("api/map/{}/goal", self.candidate_id);
        let response = self.get(&path)?;
        response
            .json::<RawGoalResponse>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn send(&self, mutation: &Mutation) -> Result<(), ApiError> {
        let url = self.endpoint(mutation.endpoint.path())?;
        let request = match mutation.method {
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        debug!("{mutation}");
        let response = request.json(&mutation.body).send()?;
        expect_ok(response.status())
    }
}

/// The service signals success with exactly 200.
fn expect_ok(status: StatusCode) -> Result<(), ApiError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}
