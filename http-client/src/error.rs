//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur while talking to the media server
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or transport error (connection refused, timeout, DNS)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The server answered with an unexpected status code
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The response body could not be decoded
    #[error("JSON parsing error: {0}")]
    Parse(String),

    /// The base URL or a request path was invalid
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection was closed by its owner
    #[error("Connection closed")]
    Closed,
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            HttpError::Parse(error.to_string())
        } else {
            HttpError::Network(error.to_string())
        }
    }
}

impl From<url::ParseError> for HttpError {
    fn from(error: url::ParseError) -> Self {
        HttpError::InvalidUrl(error.to_string())
    }
}
