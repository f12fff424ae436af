use thiserror::Error;

/// Errors surfaced by the composite provider and its hooks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// Hook used outside the provider, or providers built outside a runtime
    #[error(transparent)]
    State(#[from] web_playback_state::StateError),

    #[error("API error: {0}")]
    Api(#[from] web_playback_api::ApiError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SdkError {
    /// Whether this is the "used outside the provider" contract violation
    pub fn is_not_wrapped(&self) -> bool {
        matches!(self, SdkError::State(web_playback_state::StateError::NotWrapped))
    }
}

/// Result type for web-playback-sdk operations
pub type Result<T> = std::result::Result<T, SdkError>;
