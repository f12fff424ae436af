//! Web Playback API
//!
//! Type-safe description of the vendor player that the browser Web Playback
//! SDK hands out once its script has loaded. Nothing in here talks to the
//! network: hosts (a wasm bridge, a desktop webview, a test harness) implement
//! [`Player`], [`PlayerFactory`] and [`SdkHost`] and the state layer drives
//! them.
//!
//! # Architecture
//!
//! ```text
//! SdkHost ──inject_script──▶ vendor script
//!    │                            │
//!    └──◀── on_sdk_ready ─────────┘
//!
//! PlayerFactory::create_player(PlayerInit) ──▶ Arc<dyn Player>
//!                                                  │
//!                          add_listener(PlayerEvent, Listener)
//!                                                  │
//!                                           EventPayload ──▶ state layer
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use web_playback_api::{PlayerEvent, EventPayload};
//!
//! let id = player.add_listener(
//!     PlayerEvent::Ready,
//!     Arc::new(|payload: &EventPayload| println!("{payload:?}")),
//! );
//! player.remove_listener(PlayerEvent::Ready, Some(id));
//! ```

pub mod error;
pub mod event;
pub mod host;
pub mod model;
pub mod player;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use error::{ApiError, Result};
pub use event::{EventPayload, Listener, ListenerId, PlayerEvent};
pub use host::{ReadyCallback, ScriptId, SdkHost};
pub use model::{
    Album, Artist, DeviceStatus, Disallows, ErrorKind, ErrorState, Image, PlaybackContext,
    PlaybackState, PlayerDevice, RepeatMode, Track, TrackWindow, WebPlaybackError,
    WebPlaybackInstance,
};
pub use player::{GetOAuthToken, Player, PlayerFactory, PlayerInit, PlayerRef, TokenCallback};

/// Location of the vendor script injected by the composite provider
pub const WEB_PLAYBACK_SDK_URL: &str = "https://sdk.scdn.co/spotify-player.js";
