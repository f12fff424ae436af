//! Configuration of the composite provider
//!
//! [`WebPlaybackSdkProps`] carries everything [`crate::WebPlaybackSdk`] needs
//! at mount time and on every later `set_props`.

use std::fmt;
use std::time::Duration;

use web_playback_api::GetOAuthToken;
use web_playback_state::{
    PlayerConfig, PollingConfig, DEFAULT_DEFERRED_DELAY, DEFAULT_POLL_INTERVAL,
};

use crate::error::{Result, SdkError};

/// Props of the composite provider
///
/// Changing `device_name`, `volume` or `get_oauth_token` through
/// `set_props` updates the live player in place. Changing
/// `connect_on_initialized` replaces it.
#[derive(Clone)]
pub struct WebPlaybackSdkProps {
    /// Name shown in Connect device lists
    pub device_name: String,

    /// Asked whenever the player needs an access token
    pub get_oauth_token: GetOAuthToken,

    /// Volume in `[0, 1]`
    /// Default: None (vendor default)
    pub volume: Option<f32>,

    /// Call `connect()` right after the player is constructed
    /// Default: true
    pub connect_on_initialized: bool,

    /// Refresh the playback snapshot while playing
    /// Default: true
    pub playback_state_auto_update: bool,

    /// Time between playback snapshot refreshes
    /// Default: 1000 ms
    pub playback_state_update_interval: Duration,

    /// Quiet period before a device name change is pushed to the player
    /// Default: 1000 ms
    pub device_name_debounce: Duration,
}

impl WebPlaybackSdkProps {
    pub fn new(device_name: impl Into<String>, get_oauth_token: GetOAuthToken) -> Self {
        Self {
            device_name: device_name.into(),
            get_oauth_token,
            volume: None,
            connect_on_initialized: true,
            playback_state_auto_update: true,
            playback_state_update_interval: DEFAULT_POLL_INTERVAL,
            device_name_debounce: DEFAULT_DEFERRED_DELAY,
        }
    }

    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = device_name.into();
        self
    }

    pub fn with_get_oauth_token(mut self, get_oauth_token: GetOAuthToken) -> Self {
        self.get_oauth_token = get_oauth_token;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_connect_on_initialized(mut self, connect: bool) -> Self {
        self.connect_on_initialized = connect;
        self
    }

    pub fn with_playback_state_auto_update(mut self, enabled: bool) -> Self {
        self.playback_state_auto_update = enabled;
        self
    }

    pub fn with_playback_state_update_interval(mut self, interval: Duration) -> Self {
        self.playback_state_update_interval = interval;
        self
    }

    pub fn with_device_name_debounce(mut self, debounce: Duration) -> Self {
        self.device_name_debounce = debounce;
        self
    }

    /// Validate the props and return the first issue found
    pub fn validate(&self) -> Result<()> {
        if self.device_name.trim().is_empty() {
            return Err(SdkError::InvalidConfig("Device name must not be empty".to_string()));
        }

        if let Some(volume) = self.volume {
            if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
                return Err(SdkError::InvalidConfig(format!(
                    "Volume must be between 0 and 1, got {volume}"
                )));
            }
        }

        if self.playback_state_update_interval.is_zero() {
            return Err(SdkError::InvalidConfig(
                "Playback state update interval must be greater than 0".to_string(),
            ));
        }

        if self.device_name_debounce.is_zero() {
            return Err(SdkError::InvalidConfig(
                "Device name debounce must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Inputs of the player lifecycle manager
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            device_name: self.device_name.clone(),
            volume: self.volume,
            get_oauth_token: self.get_oauth_token.clone(),
            connect_on_initialized: self.connect_on_initialized,
        }
    }

    /// Inputs of the playback snapshot poller
    pub fn polling(&self) -> PollingConfig {
        PollingConfig {
            auto_update: self.playback_state_auto_update,
            interval: self.playback_state_update_interval,
        }
    }
}

impl fmt::Debug for WebPlaybackSdkProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebPlaybackSdkProps")
            .field("device_name", &self.device_name)
            .field("volume", &self.volume)
            .field("connect_on_initialized", &self.connect_on_initialized)
            .field("playback_state_auto_update", &self.playback_state_auto_update)
            .field("playback_state_update_interval", &self.playback_state_update_interval)
            .field("device_name_debounce", &self.device_name_debounce)
            .finish_non_exhaustive()
    }
}
