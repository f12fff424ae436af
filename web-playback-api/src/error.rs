use thiserror::Error;

/// Errors surfaced by vendor player operations
///
/// The vendor SDK reports most problems through error *events*, which the
/// state layer republishes as data. This type only covers the rejected
/// results of the asynchronous operations themselves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The operation needs a connected player
    #[error("Player is not connected")]
    NotConnected,

    /// Invalid parameter value
    ///
    /// Volume outside `[0, 1]`, unknown event names and similar.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The host bridge failed to forward the call to the vendor object
    #[error("Bridge error: {0}")]
    Bridge(String),

    /// The vendor player rejected the operation
    #[error("Operation rejected by player: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Shorthand for an out-of-range volume
    pub fn invalid_volume(volume: f32) -> Self {
        Self::InvalidParameter(format!("volume {volume} is outside [0, 1]"))
    }
}

/// Result type for vendor player operations
pub type Result<T> = std::result::Result<T, ApiError>;
