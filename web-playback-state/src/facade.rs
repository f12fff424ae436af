//! Reduced, identity-stable view of a player for UI consumers

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use web_playback_api::{PlaybackState, PlayerRef, Result};

struct FacadeInner {
    instance: PlayerRef,
}

/// Transport and query operations of the current player
///
/// Listener registration and the name/volume setters are left out; those
/// belong to the provider that owns the instance. One facade is created per
/// player instance, so clones compare equal (by identity) for as long as the
/// instance lives, and a new facade appears only when the instance changes.
#[derive(Clone)]
pub struct SpotifyPlayer {
    inner: Arc<FacadeInner>,
}

impl SpotifyPlayer {
    pub(crate) fn new(instance: PlayerRef) -> Self {
        Self {
            inner: Arc::new(FacadeInner { instance }),
        }
    }

    /// Whether both facades wrap the same player instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn connect(&self) -> BoxFuture<'static, Result<bool>> {
        self.inner.instance.connect()
    }

    pub fn disconnect(&self) {
        self.inner.instance.disconnect()
    }

    pub fn get_current_state(&self) -> BoxFuture<'static, Result<Option<PlaybackState>>> {
        self.inner.instance.get_current_state()
    }

    pub fn next_track(&self) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.next_track()
    }

    pub fn pause(&self) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.pause()
    }

    pub fn previous_track(&self) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.previous_track()
    }

    pub fn resume(&self) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.resume()
    }

    pub fn seek(&self, position_ms: u64) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.seek(position_ms)
    }

    pub fn toggle_play(&self) -> BoxFuture<'static, Result<()>> {
        self.inner.instance.toggle_play()
    }
}

impl PartialEq for SpotifyPlayer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SpotifyPlayer {}

impl fmt::Debug for SpotifyPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyPlayer")
            .field("facade", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_playback_api::mock::{MockPlayer, PlayerCall};
    use web_playback_api::PlayerInit;

    fn mock_player() -> Arc<MockPlayer> {
        Arc::new(MockPlayer::new(PlayerInit {
            name: "facade test".to_string(),
            get_oauth_token: Arc::new(|_| {}),
            volume: None,
        }))
    }

    #[tokio::test]
    async fn test_operations_pass_through() {
        let mock = mock_player();
        let facade = SpotifyPlayer::new(mock.clone());

        assert!(facade.connect().await.unwrap());
        facade.pause().await.unwrap();
        facade.resume().await.unwrap();
        facade.seek(42_000).await.unwrap();
        facade.toggle_play().await.unwrap();
        facade.next_track().await.unwrap();
        facade.previous_track().await.unwrap();
        assert_eq!(facade.get_current_state().await.unwrap(), None);
        facade.disconnect();

        assert_eq!(
            mock.calls(),
            vec![
                PlayerCall::Connect,
                PlayerCall::Pause,
                PlayerCall::Resume,
                PlayerCall::Seek(42_000),
                PlayerCall::TogglePlay,
                PlayerCall::NextTrack,
                PlayerCall::PreviousTrack,
                PlayerCall::GetCurrentState,
                PlayerCall::Disconnect,
            ]
        );
    }

    #[test]
    fn test_identity() {
        let mock = mock_player();
        let facade = SpotifyPlayer::new(mock.clone());
        let other = SpotifyPlayer::new(mock);

        assert_eq!(facade, facade.clone());
        assert_ne!(facade, other);
    }
}
