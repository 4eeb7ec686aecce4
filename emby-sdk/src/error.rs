use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("State management error: {0}")]
    StateError(#[from] emby_state::StateError),

    #[error("API error: {0}")]
    ApiError(#[from] emby_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Sensor not found: {0}")]
    SensorNotFound(String),
}

impl From<serde_json::Error> for SdkError {
    fn from(error: serde_json::Error) -> Self {
        SdkError::Config(error.to_string())
    }
}
