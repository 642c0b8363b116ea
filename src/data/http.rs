//! reqwest-backed fetch port
//!
//! Requests the top coins by volume from the CryptoCompare API and classifies
//! transport faults into [`ClientError`] categories.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::remote::{HttpClient, RemoteRootFeed};
use crate::error::ClientError;

/// Default feed endpoint: top 20 coins by total volume, quoted in USD
pub const DEFAULT_ENDPOINT: &str =
    "https://min-api.cryptocompare.com/data/top/totalvolfull?limit=20&tsym=USD";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for fetching the raw feed
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestHttpClient {
    /// Create a client for the default endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client with a custom reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            ..Self::new()
        }
    }

    /// Point the client at another endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self) -> Result<RemoteRootFeed, ClientError> {
        debug!(endpoint = %self.endpoint, "GET feed");

        let response = self
            .client
            .get(&self.endpoint)
            .header("accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_request_error)?;

        if let Some(error) = classify_status(response.status()) {
            return Err(error);
        }

        let body = response.bytes().await.map_err(classify_request_error)?;
        let root: RemoteRootFeed = serde_json::from_slice(&body)?;

        Ok(root)
    }
}

/// Map a non-success HTTP status to its fault category
///
/// Returns `None` for 2xx statuses.
pub fn classify_status(status: StatusCode) -> Option<ClientError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::BAD_REQUEST => ClientError::BadRequest,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => ClientError::InternalServerError,
        other => ClientError::UnexpectedStatus(other.as_u16()),
    })
}

fn classify_request_error(error: reqwest::Error) -> ClientError {
    if error.is_connect() || error.is_timeout() {
        ClientError::Connectivity(error.to_string())
    } else if error.is_decode() || error.is_body() {
        ClientError::InvalidData(error.to_string())
    } else if let Some(status) = error.status() {
        classify_status(status)
            .unwrap_or_else(|| ClientError::Unexpected(error.to_string()))
    } else {
        ClientError::Unexpected(error.to_string())
    }
}
