//! Error types for emby-state

use std::fmt;

use emby_api::ApiError;

/// Result type for emby-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur during polling and caching
#[derive(Debug)]
pub enum StateError {
    /// A refresh did not produce a new snapshot; the cache was left untouched
    RefreshFailed {
        resource: String,
        source: ApiError,
    },

    /// The initial refresh failed, so there is nothing to serve yet
    NotReady {
        resource: String,
        source: ApiError,
    },

    /// Invalid coordinator or polling configuration
    InvalidConfig(String),

    /// A polling task could not be stopped cleanly
    ShutdownFailed(String),
}

impl StateError {
    /// The API error behind a failed refresh, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StateError::RefreshFailed { source, .. } | StateError::NotReady { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::RefreshFailed { resource, source } => {
                write!(f, "Error fetching {}: {}", resource, source)
            }
            StateError::NotReady { resource, source } => {
                write!(f, "{} not ready: {}", resource, source)
            }
            StateError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            StateError::ShutdownFailed(msg) => write!(f, "Shutdown failed: {}", msg),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.api_error().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_refresh_failed_display() {
        let error = StateError::RefreshFailed {
            resource: "Emby Sessions".to_string(),
            source: ApiError::HttpStatus(500),
        };
        assert_eq!(error.to_string(), "Error fetching Emby Sessions: HTTP status 500");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_config_error_has_no_source() {
        let error = StateError::InvalidConfig("interval must be positive".to_string());
        assert!(error.source().is_none());
        assert!(error.api_error().is_none());
    }
}
