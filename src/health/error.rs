//! Error types for health checking.

use thiserror::Error;

/// A registry query that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Registry answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Query URI could not be parsed
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// Body could not be read as text
    #[error("invalid response: {0}")]
    Decode(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Failure of a whole probe invocation.
///
/// Produced when any datacentre query fails at the transport level. The
/// remaining datacentres are not queried.
#[derive(Debug, Clone, Error)]
pub enum HealthCheckError {
    #[error("health check for '{service}' failed in datacentre '{datacentre}' ({uri}): {source}")]
    Transport {
        service: String,
        datacentre: String,
        uri: String,
        #[source]
        source: TransportError,
    },
}

impl HealthCheckError {
    /// The underlying transport failure.
    pub fn transport(&self) -> &TransportError {
        match self {
            HealthCheckError::Transport { source, .. } => source,
        }
    }
}
