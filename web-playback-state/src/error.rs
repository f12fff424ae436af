//! Error types for web-playback-state

use std::fmt;

/// Message of every hook used outside its provider
pub const MUST_BE_WRAPPED_MESSAGE: &str = "This hook must be used within WebPlaybackSdk";

/// Result type for web-playback-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur during state management
#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// A context was read from a scope its provider never populated
    NotWrapped,

    /// Providers were created outside a tokio runtime
    NoRuntime,

    /// The provider behind a watcher has been dropped
    WatcherClosed,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotWrapped => f.write_str(MUST_BE_WRAPPED_MESSAGE),
            StateError::NoRuntime => write!(f, "Providers must be created inside a tokio runtime"),
            StateError::WatcherClosed => write!(f, "State watcher closed"),
        }
    }
}

impl std::error::Error for StateError {}
