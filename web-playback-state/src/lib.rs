//! Web Playback State
//!
//! Reactive state for a Web Playback SDK player. The vendor player is
//! imperative and callback driven; this crate turns it into values that can be
//! read at any time and watched for changes.
//!
//! # Features
//!
//! - **Lazy construction**: the player is built once the SDK reports it is
//!   ready, and torn down exactly once on unmount
//! - **Event mirrors**: device, playback and error events become
//!   `Option<T>` values published through `tokio::sync::watch`
//! - **Playback polling**: the playback snapshot is refreshed on a timer
//!   while the player is playing
//! - **Scoped lookup**: providers register contexts in a [`Scope`]; reading a
//!   context outside one is a [`StateError::NotWrapped`]
//!
//! # Architecture
//!
//! ```text
//! SdkHost ──ready──▶ ReadinessProvider
//!                          │ ready
//!                          ▼
//!                    PlayerProvider ──▶ Option<PlayerHandle>
//!                          │
//!        ┌─────────────────┼──────────────────┐
//!        ▼                 ▼                  ▼
//! DeviceStateProvider PlaybackStateProvider ErrorStateProvider
//!        │                 │ (+ poller)       │
//!        └──────── StateContext<T> in Scope ──┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use web_playback_state::{PlayerProvider, PlaybackStateProvider, PollingConfig};
//!
//! let mut player = PlayerProvider::new(factory, &config)?;
//! let mut playback = PlaybackStateProvider::new()?;
//!
//! // On every render:
//! player.render(readiness.is_ready(), &config);
//! playback.render(player.handle().as_ref(), &PollingConfig::default());
//!
//! if let Some(state) = playback.current() {
//!     println!("paused: {}", state.paused);
//! }
//! ```

// Providers
pub mod device;
pub mod error_state;
pub mod lifecycle;
pub mod playback;
pub mod readiness;

// Event mirroring shared by the providers
pub mod mirror;

// Context lookup and change watching
pub mod scope;
pub mod watcher;

pub mod deferred;
pub mod facade;

// Error types
pub mod error;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use device::{DeviceMirror, DeviceStateProvider};
pub use error_state::{ErrorMirror, ErrorStateProvider};
pub use lifecycle::{InstanceId, PlayerConfig, PlayerHandle, PlayerProvider};
pub use playback::{PlaybackMirror, PlaybackStateProvider, PollingConfig, DEFAULT_POLL_INTERVAL};
pub use readiness::{ReadinessProvider, ReadyContext, ReadySignal};

pub use mirror::{EventMirror, EventSubscription, MirrorKind, Publisher};

pub use scope::{Context, Scope, StateContext};
pub use watcher::StateWatcher;

pub use deferred::{DeferredEffect, DEFAULT_DEFERRED_DELAY};
pub use facade::SpotifyPlayer;

pub use error::{Result, StateError, MUST_BE_WRAPPED_MESSAGE};

pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

// Vendor types that appear in this crate's public API
pub use web_playback_api::{
    ErrorKind, ErrorState, PlaybackState, PlayerDevice, DeviceStatus, GetOAuthToken,
};
