//! Registry query transport.

use super::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches a URI and returns the response body as text.
///
/// The probe only depends on this trait, so tests can substitute an
/// in-memory fake for the HTTP client.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<String, TransportError>;
}

/// `Fetcher` backed by a `reqwest` client.
///
/// Any non-2xx response is a transport failure: the registry itself answers
/// 200 for a known service regardless of that service's health.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl HttpFetcher {
    /// Build a fetcher with its own client and a per-request timeout.
    pub fn new(timeout_seconds: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self::with_client(client, timeout_seconds))
    }

    /// Create a fetcher with custom HTTP client (for testing).
    pub fn with_client(client: reqwest::Client, timeout_seconds: u64) -> Self {
        Self {
            client,
            timeout_seconds,
        }
    }

    /// Classify reqwest error into TransportError.
    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(timeout_seconds)
        } else if e.is_builder() {
            TransportError::InvalidUri(e.to_string())
        } else if e.is_decode() || e.is_body() {
            TransportError::Decode(e.to_string())
        } else {
            // All other errors treated as connection failures
            TransportError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, TransportError> {
        let url = reqwest::Url::parse(uri)
            .map_err(|e| TransportError::InvalidUri(format!("{}: {}", uri, e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))
    }
}
