//! # Web Playback SDK - reactive player state
//!
//! Mount one [`WebPlaybackSdk`] per application and read the player's state
//! through hooks:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use web_playback_sdk::{
//!     use_error_state, use_playback_state, use_player_device, use_spotify_player,
//!     use_web_playback_sdk_ready, WebPlaybackSdk, WebPlaybackSdkProps,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), web_playback_sdk::SdkError> {
//!     let props = WebPlaybackSdkProps::new(
//!         "My Web Player",
//!         Arc::new(|callback| callback(fetch_access_token())),
//!     )
//!     .with_volume(0.5);
//!
//!     let sdk = WebPlaybackSdk::mount(host, props)?;
//!     let scope = sdk.scope();
//!
//!     if use_web_playback_sdk_ready(scope)? {
//!         if let Some(player) = use_spotify_player(scope)? {
//!             player.toggle_play().await?;
//!         }
//!     }
//!
//!     println!("device:   {:?}", use_player_device(scope)?);
//!     println!("playback: {:?}", use_playback_state(scope)?);
//!     println!("error:    {:?}", use_error_state(scope)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Lazy player**: built once the vendor script reports it loaded,
//!   disconnected on unmount
//! - **Reactive state**: device, playback and error events as `Option<T>`
//!   values, plus watchers for awaiting changes
//! - **Fresh playback position**: snapshots are re-queried every second while
//!   playing
//! - **Cheap prop changes**: renaming the device or changing the volume never
//!   rebuilds the player
//!
//! ## Architecture
//!
//! ```text
//! web-playback-sdk (WebPlaybackSdk + hooks)
//!     ↓
//! web-playback-state (providers, mirrors, polling)
//!     ↓
//! web-playback-api (Player / SdkHost traits, data model)
//! ```

pub use config::WebPlaybackSdkProps;
pub use error::{Result, SdkError};
pub use hooks::{
    use_error_state, use_playback_state, use_player_device, use_spotify_player,
    use_spotify_player_raw_instance, use_web_playback_sdk_ready, watch_error_state,
    watch_playback_state, watch_player_device,
};
pub use sdk::WebPlaybackSdk;

// Re-export commonly used types from the lower layers
pub use web_playback_api::{
    DeviceStatus, ErrorKind, ErrorState, GetOAuthToken, PlaybackState, Player, PlayerDevice,
    PlayerFactory, PlayerRef, SdkHost, WEB_PLAYBACK_SDK_URL,
};
pub use web_playback_state::{
    init_logging, init_logging_from_env, LoggingMode, Scope, SpotifyPlayer, StateError,
    StateWatcher, MUST_BE_WRAPPED_MESSAGE,
};

mod config;
mod error;
mod hooks;
mod sdk;
