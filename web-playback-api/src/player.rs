//! The vendor player object and its constructor

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::event::{Listener, ListenerId, PlayerEvent};
use crate::model::PlaybackState;

/// Receives an OAuth access token once it has been retrieved
pub type TokenCallback = Box<dyn FnOnce(String) + Send>;

/// Asked by the player whenever it needs a (fresh) access token
///
/// Retrieval may be asynchronous: the provider calls the callback whenever
/// the token is available.
pub type GetOAuthToken = Arc<dyn Fn(TokenCallback) + Send + Sync>;

/// Construction parameters of a player
#[derive(Clone)]
pub struct PlayerInit {
    /// Device name shown in Connect device lists
    pub name: String,
    pub get_oauth_token: GetOAuthToken,
    /// Initial volume in `[0, 1]`; the vendor default applies when `None`
    pub volume: Option<f32>,
}

impl fmt::Debug for PlayerInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerInit")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

/// One streaming playback device owned by the vendor SDK
///
/// Calls are issued synchronously; asynchronous results come back as boxed
/// futures that the caller may await or drop.
pub trait Player: Send + Sync {
    /// Connect to the streaming backend, resolving to whether it succeeded
    fn connect(&self) -> BoxFuture<'static, Result<bool>>;

    fn disconnect(&self);

    fn add_listener(&self, event: PlayerEvent, listener: Listener) -> ListenerId;

    /// Remove one listener, or every listener for `event` when `id` is `None`
    ///
    /// Returns whether anything was removed.
    fn remove_listener(&self, event: PlayerEvent, id: Option<ListenerId>) -> bool;

    fn get_current_state(&self) -> BoxFuture<'static, Result<Option<PlaybackState>>>;

    fn get_volume(&self) -> BoxFuture<'static, Result<f32>>;

    fn next_track(&self) -> BoxFuture<'static, Result<()>>;

    fn pause(&self) -> BoxFuture<'static, Result<()>>;

    fn previous_track(&self) -> BoxFuture<'static, Result<()>>;

    fn resume(&self) -> BoxFuture<'static, Result<()>>;

    fn seek(&self, position_ms: u64) -> BoxFuture<'static, Result<()>>;

    fn toggle_play(&self) -> BoxFuture<'static, Result<()>>;

    fn set_name(&self, name: String) -> BoxFuture<'static, Result<()>>;

    fn set_volume(&self, volume: f32) -> BoxFuture<'static, Result<()>>;

    /// Unlock media playback on platforms that require a user gesture
    fn activate_element(&self) -> BoxFuture<'static, Result<()>>;
}

pub type PlayerRef = Arc<dyn Player>;

/// The vendor player constructor, usable once the SDK reported readiness
pub trait PlayerFactory: Send + Sync {
    fn create_player(&self, init: PlayerInit) -> PlayerRef;
}
