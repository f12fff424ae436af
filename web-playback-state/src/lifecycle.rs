//! Player lifecycle: construct on readiness, tear down on unmount
//!
//! [`PlayerProvider`] owns the single player instance of a provider tree. It
//! is render-driven: the owner calls [`PlayerProvider::render`] with the
//! current readiness flag and configuration whenever either may have changed,
//! and the provider works out what to do by comparing against the previous
//! render.
//!
//! - A new instance is built only when `(ready, connect_on_initialized)`
//!   changes. Name, volume and token callback changes never rebuild it, so an
//!   active stream is not interrupted for cosmetic changes.
//! - Name changes are pushed with `set_name` after a debounce window.
//! - Volume changes are pushed with `set_volume` immediately.
//! - The token callback handed to the instance always forwards to the
//!   callback of the latest render.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use web_playback_api::{GetOAuthToken, PlayerFactory, PlayerInit, PlayerRef};

use crate::deferred::{DeferredEffect, DEFAULT_DEFERRED_DELAY};
use crate::facade::SpotifyPlayer;
use crate::scope::{Scope, StateContext};
use crate::{Result, StateError};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one constructed player instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Borrowed view of the live instance handed to mirrors and hooks
#[derive(Clone)]
pub struct PlayerHandle {
    id: InstanceId,
    instance: PlayerRef,
    facade: SpotifyPlayer,
}

impl PlayerHandle {
    pub(crate) fn new(instance: PlayerRef) -> Self {
        Self {
            id: InstanceId::next(),
            facade: SpotifyPlayer::new(Arc::clone(&instance)),
            instance,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn instance(&self) -> &PlayerRef {
        &self.instance
    }

    pub fn facade(&self) -> &SpotifyPlayer {
        &self.facade
    }
}

impl fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerHandle").field("id", &self.id).finish()
    }
}

/// Inputs of the lifecycle manager
#[derive(Clone)]
pub struct PlayerConfig {
    pub device_name: String,
    /// Volume in `[0, 1]`; `None` leaves the player's volume alone
    pub volume: Option<f32>,
    pub get_oauth_token: GetOAuthToken,
    pub connect_on_initialized: bool,
}

impl fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("device_name", &self.device_name)
            .field("volume", &self.volume)
            .field("connect_on_initialized", &self.connect_on_initialized)
            .finish_non_exhaustive()
    }
}

/// Inputs whose change starts a new instance epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EpochKey {
    ready: bool,
    connect_on_initialized: bool,
}

pub struct PlayerProvider {
    factory: Arc<dyn PlayerFactory>,
    runtime: Handle,
    token: Arc<RwLock<GetOAuthToken>>,
    slot: Arc<watch::Sender<Option<PlayerHandle>>>,
    epoch: Option<EpochKey>,
    device_name: DeferredEffect<String>,
    volume: Option<f32>,
}

impl PlayerProvider {
    /// Create an unmounted provider; must be called inside a tokio runtime
    pub fn new(factory: Arc<dyn PlayerFactory>, config: &PlayerConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| StateError::NoRuntime)?;
        let (slot, _rx) = watch::channel(None);

        Ok(Self {
            factory,
            token: Arc::new(RwLock::new(Arc::clone(&config.get_oauth_token))),
            slot: Arc::new(slot),
            epoch: None,
            device_name: DeferredEffect::new(DEFAULT_DEFERRED_DELAY, runtime.clone())
                .skip_initial(),
            volume: config.volume,
            runtime,
        })
    }

    /// Debounce window for pushing device name changes
    pub fn with_rename_delay(mut self, delay: Duration) -> Self {
        self.set_rename_delay(delay);
        self
    }

    /// Takes effect for the next name change
    pub fn set_rename_delay(&mut self, delay: Duration) {
        self.device_name.set_delay(delay);
    }

    pub fn render(&mut self, ready: bool, config: &PlayerConfig) {
        *self.token.write() = Arc::clone(&config.get_oauth_token);
        let renaming = self.handle();

        let key = EpochKey {
            ready,
            connect_on_initialized: config.connect_on_initialized,
        };
        if self.epoch != Some(key) {
            self.epoch = Some(key);
            self.teardown();
            if ready {
                self.construct(config);
            }
        }

        self.apply_device_name(&config.device_name, renaming);
        self.apply_volume(config.volume);
    }

    /// Disconnect the instance and stop pending work
    pub fn unmount(&mut self) {
        self.device_name.cancel();
        self.teardown();
        self.epoch = None;
    }

    /// The live instance, if one is constructed
    pub fn handle(&self) -> Option<PlayerHandle> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<PlayerHandle>> {
        self.slot.subscribe()
    }

    pub fn provide(&self, scope: &mut Scope) {
        scope.provide(StateContext::new(self.subscribe()));
    }

    fn construct(&mut self, config: &PlayerConfig) {
        let holder = Arc::clone(&self.token);
        let get_oauth_token: GetOAuthToken = Arc::new(move |callback| {
            let latest = holder.read().clone();
            latest(callback)
        });

        let instance = self.factory.create_player(PlayerInit {
            name: config.device_name.clone(),
            get_oauth_token,
            volume: config.volume,
        });
        let handle = PlayerHandle::new(instance);
        info!(instance = %handle.id(), device_name = %config.device_name, "Constructed player");

        if config.connect_on_initialized {
            let id = handle.id();
            let connecting = handle.instance().connect();
            self.runtime.spawn(async move {
                match connecting.await {
                    Ok(true) => debug!(instance = %id, "Player connected"),
                    Ok(false) => warn!(instance = %id, "Player refused to connect"),
                    Err(e) => warn!(instance = %id, error = %e, "Player connect failed"),
                }
            });
        }

        self.slot.send_replace(Some(handle));
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.slot.send_replace(None) {
            debug!(instance = %handle.id(), "Disconnecting player");
            handle.instance().disconnect();
        }
    }

    /// Rename `target`, the instance that was live when the name changed
    ///
    /// An instance built later was constructed with the new name already.
    fn apply_device_name(&mut self, name: &str, target: Option<PlayerHandle>) {
        let name = name.to_string();
        self.device_name.update(name.clone(), move || async move {
            let Some(handle) = target else {
                return;
            };
            debug!(instance = %handle.id(), device_name = %name, "Renaming player");
            if let Err(e) = handle.instance().set_name(name).await {
                warn!(instance = %handle.id(), error = %e, "Failed to rename player");
            }
        });
    }

    fn apply_volume(&mut self, volume: Option<f32>) {
        if self.volume == volume {
            return;
        }
        self.volume = volume;

        let (Some(volume), Some(handle)) = (volume, self.handle()) else {
            return;
        };
        let pending = handle.instance().set_volume(volume);
        self.runtime.spawn(async move {
            if let Err(e) = pending.await {
                warn!(instance = %handle.id(), volume, error = %e, "Failed to set volume");
            }
        });
    }
}

impl Drop for PlayerProvider {
    fn drop(&mut self) {
        self.teardown();
    }
}
