//! Event names and payloads delivered by the vendor player

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{ErrorKind, PlaybackState, WebPlaybackError, WebPlaybackInstance};

/// Named events a player can deliver to registered listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    Ready,
    NotReady,
    PlayerStateChanged,
    AutoplayFailed,
    InitializationError,
    AuthenticationError,
    AccountError,
    PlaybackError,
}

impl PlayerEvent {
    /// Every event the vendor SDK knows about
    pub const ALL: [PlayerEvent; 8] = [
        PlayerEvent::Ready,
        PlayerEvent::NotReady,
        PlayerEvent::PlayerStateChanged,
        PlayerEvent::AutoplayFailed,
        PlayerEvent::InitializationError,
        PlayerEvent::AuthenticationError,
        PlayerEvent::AccountError,
        PlayerEvent::PlaybackError,
    ];

    /// Wire name used by the vendor listener API
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerEvent::Ready => "ready",
            PlayerEvent::NotReady => "not_ready",
            PlayerEvent::PlayerStateChanged => "player_state_changed",
            PlayerEvent::AutoplayFailed => "autoplay_failed",
            PlayerEvent::InitializationError => "initialization_error",
            PlayerEvent::AuthenticationError => "authentication_error",
            PlayerEvent::AccountError => "account_error",
            PlayerEvent::PlaybackError => "playback_error",
        }
    }

    /// The error kind reported by this event, if it is an error event
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            PlayerEvent::InitializationError => Some(ErrorKind::InitializationError),
            PlayerEvent::AuthenticationError => Some(ErrorKind::AuthenticationError),
            PlayerEvent::AccountError => Some(ErrorKind::AccountError),
            PlayerEvent::PlaybackError => Some(ErrorKind::PlaybackError),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerEvent {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| ApiError::InvalidParameter(format!("unknown player event: {s}")))
    }
}

/// Argument passed to a listener when an event fires
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// `ready` / `not_ready`
    Instance(WebPlaybackInstance),
    /// `player_state_changed`; the vendor may report a null state
    State(Option<PlaybackState>),
    /// The four error events
    Error(WebPlaybackError),
    /// `autoplay_failed`
    Empty,
}

/// Callback registered for one event name
pub type Listener = Arc<dyn Fn(&EventPayload) + Send + Sync>;

/// Token returned by `add_listener`, used to remove exactly that listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}
