use http_client::HttpError;
use thiserror::Error;

/// High-level API errors for Emby operations
///
/// This enum abstracts away the transport details and groups failures into
/// the three kinds callers care about: the server could not be reached, the
/// server refused the request, or the server answered with something we
/// could not understand.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// Connection refused, DNS failure, or a request that exceeded the
    /// transport timeout.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The server answered with a non-success status code
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Response parsing error
    ///
    /// The server returned a body that is not the JSON shape we expect.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The shared connection has been closed
    #[error("Connection closed")]
    ConnectionClosed,

    /// A playback command was not accepted by the server
    #[error("Command {command} failed with status {status}")]
    CommandRejected {
        /// Wire name of the command
        command: &'static str,
        /// Status code returned by the server
        status: u16,
    },
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::NetworkError(msg),
            HttpError::Status(code) => ApiError::HttpStatus(code),
            HttpError::Parse(msg) => ApiError::ParseError(msg),
            HttpError::InvalidUrl(msg) => ApiError::InvalidParameter(msg),
            HttpError::Closed => ApiError::ConnectionClosed,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}
