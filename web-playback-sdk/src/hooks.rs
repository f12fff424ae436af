//! Read hooks over the provider scope
//!
//! Every hook takes the [`Scope`] handed out by
//! [`crate::WebPlaybackSdk::scope`] and fails with the same
//! [`MUST_BE_WRAPPED_MESSAGE`](web_playback_state::MUST_BE_WRAPPED_MESSAGE)
//! error when the scope does not come from a mounted provider. Inside one,
//! `Ok(None)` means "nothing reported yet" (or no player right now).

use web_playback_api::{ErrorState, PlaybackState, PlayerDevice, PlayerRef};
use web_playback_state::{
    PlayerHandle, ReadyContext, Scope, SpotifyPlayer, StateContext, StateWatcher,
};

use crate::error::Result;

fn player_handle(scope: &Scope) -> Result<Option<PlayerHandle>> {
    Ok(scope.lookup::<StateContext<PlayerHandle>>()?.current())
}

/// Transport controls of the current player
///
/// The same facade (by identity) is returned for as long as the player
/// instance lives.
pub fn use_spotify_player(scope: &Scope) -> Result<Option<SpotifyPlayer>> {
    Ok(player_handle(scope)?.map(|handle| handle.facade().clone()))
}

/// The vendor player itself, for operations the facade leaves out
pub fn use_spotify_player_raw_instance(scope: &Scope) -> Result<Option<PlayerRef>> {
    Ok(player_handle(scope)?.map(|handle| handle.instance().clone()))
}

pub fn use_playback_state(scope: &Scope) -> Result<Option<PlaybackState>> {
    Ok(scope.lookup::<StateContext<PlaybackState>>()?.current())
}

pub fn use_player_device(scope: &Scope) -> Result<Option<PlayerDevice>> {
    Ok(scope.lookup::<StateContext<PlayerDevice>>()?.current())
}

pub fn use_error_state(scope: &Scope) -> Result<Option<ErrorState>> {
    Ok(scope.lookup::<StateContext<ErrorState>>()?.current())
}

/// Whether the vendor SDK finished loading
pub fn use_web_playback_sdk_ready(scope: &Scope) -> Result<bool> {
    Ok(scope.lookup::<ReadyContext>()?.is_ready())
}

/// Await playback snapshots instead of re-reading them
pub fn watch_playback_state(scope: &Scope) -> Result<StateWatcher<PlaybackState>> {
    Ok(scope.lookup::<StateContext<PlaybackState>>()?.watch())
}

pub fn watch_player_device(scope: &Scope) -> Result<StateWatcher<PlayerDevice>> {
    Ok(scope.lookup::<StateContext<PlayerDevice>>()?.watch())
}

pub fn watch_error_state(scope: &Scope) -> Result<StateWatcher<ErrorState>> {
    Ok(scope.lookup::<StateContext<ErrorState>>()?.watch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SdkError;
    use rstest::rstest;
    use web_playback_state::{StateError, MUST_BE_WRAPPED_MESSAGE};

    fn message<T>(result: Result<T>) -> String {
        match result {
            Ok(_) => panic!("hook succeeded outside the provider"),
            Err(e) => {
                assert!(e.is_not_wrapped(), "unexpected error: {e:?}");
                e.to_string()
            }
        }
    }

    #[rstest]
    #[case::player(message(use_spotify_player(&Scope::new())))]
    #[case::raw_instance(message(use_spotify_player_raw_instance(&Scope::new())))]
    #[case::playback(message(use_playback_state(&Scope::new())))]
    #[case::device(message(use_player_device(&Scope::new())))]
    #[case::error(message(use_error_state(&Scope::new())))]
    #[case::ready(message(use_web_playback_sdk_ready(&Scope::new())))]
    #[case::watch_playback(message(watch_playback_state(&Scope::new())))]
    #[case::watch_device(message(watch_player_device(&Scope::new())))]
    #[case::watch_error(message(watch_error_state(&Scope::new())))]
    fn test_every_hook_fails_outside_provider(#[case] error: String) {
        assert_eq!(error, MUST_BE_WRAPPED_MESSAGE);
    }

    #[test]
    fn test_other_errors_are_not_wrapping_violations() {
        let err = SdkError::InvalidConfig("volume".to_string());
        assert!(!err.is_not_wrapped());
        assert!(!SdkError::from(StateError::NoRuntime).is_not_wrapped());
    }
}
