//! Data carried by player events and state queries
//!
//! Field names follow the vendor's JSON so hosts that bridge snapshots as
//! JSON can deserialize them directly. Every field has a default: the vendor
//! omits fields freely, and the state layer only ever reads `paused`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of the player's playback, as reported by the vendor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackState {
    pub context: PlaybackContext,
    pub disallows: Disallows,
    /// Track duration in milliseconds
    pub duration: u64,
    pub loading: bool,
    pub paused: bool,
    /// Playback position in milliseconds
    pub position: u64,
    pub repeat_mode: RepeatMode,
    pub shuffle: bool,
    /// Vendor timestamp of the snapshot, milliseconds since the epoch
    pub timestamp: u64,
    pub track_window: TrackWindow,
}

impl PlaybackState {
    /// Track currently loaded in the player, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.track_window.current_track.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackContext {
    pub uri: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Operations the vendor currently refuses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Disallows {
    pub pausing: bool,
    pub peeking_next: bool,
    pub peeking_prev: bool,
    pub resuming: bool,
    pub seeking: bool,
    pub skipping_next: bool,
    pub skipping_prev: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl From<u8> for RepeatMode {
    fn from(value: u8) -> Self {
        match value {
            1 => RepeatMode::Context,
            2 => RepeatMode::Track,
            _ => RepeatMode::Off,
        }
    }
}

impl From<RepeatMode> for u8 {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => 0,
            RepeatMode::Context => 1,
            RepeatMode::Track => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackWindow {
    pub current_track: Option<Track>,
    pub previous_tracks: Vec<Track>,
    pub next_tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub uri: String,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub track_type: String,
    pub media_type: String,
    pub name: String,
    pub is_playable: bool,
    pub duration_ms: u64,
    pub album: Album,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub uri: String,
    pub name: String,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Payload of `ready` / `not_ready`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPlaybackInstance {
    pub device_id: String,
}

impl WebPlaybackInstance {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
        }
    }
}

/// Payload of the four error events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPlaybackError {
    pub message: String,
}

impl WebPlaybackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Whether the device behind the player can currently receive playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Ready,
    NotReady,
}

/// Latest device announcement, tagged with the event that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDevice {
    pub device_id: String,
    pub status: DeviceStatus,
}

impl PlayerDevice {
    pub fn new(device_id: impl Into<String>, status: DeviceStatus) -> Self {
        Self {
            device_id: device_id.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InitializationError,
    AuthenticationError,
    AccountError,
    PlaybackError,
}

impl ErrorKind {
    /// Same spelling as the event that reports this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InitializationError => "initialization_error",
            ErrorKind::AuthenticationError => "authentication_error",
            ErrorKind::AccountError => "account_error",
            ErrorKind::PlaybackError => "playback_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest vendor error, tagged with the event that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    #[serde(rename = "type")]
    pub error_type: ErrorKind,
    pub message: String,
}

impl ErrorState {
    pub fn new(error_type: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}
