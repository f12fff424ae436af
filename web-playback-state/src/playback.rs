//! Playback snapshots from `player_state_changed`, refreshed while playing
//!
//! Besides mirroring the event, [`PlaybackStateProvider`] keeps the snapshot
//! fresh between events: while a player is present, polling is enabled, a
//! snapshot exists and it is not paused, a timer calls `get_current_state`
//! every `interval` and publishes the result.
//!
//! Everything the timer depends on is folded into a poll key. Whenever the key
//! changes (a new snapshot flips `paused`, the player is swapped, the interval
//! is reconfigured) the running timer is aborted and, if the new key still
//! calls for polling, a fresh one starts with its first tick one interval out.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};
use web_playback_api::{EventPayload, PlaybackState, PlayerEvent};

use crate::lifecycle::{InstanceId, PlayerHandle};
use crate::mirror::{EventMirror, MirrorKind, Publisher};
use crate::scope::Scope;
use crate::{Result, StateError};

/// Refresh interval used when none is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Refresh the snapshot while playing
    pub auto_update: bool,
    /// Time between refreshes; zero disables polling
    pub interval: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            auto_update: true,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

pub struct PlaybackMirror;

impl MirrorKind for PlaybackMirror {
    type Value = PlaybackState;
    const NAME: &'static str = "playback";
    const EVENTS: &'static [PlayerEvent] = &[PlayerEvent::PlayerStateChanged];

    fn transform(_event: PlayerEvent, payload: &EventPayload) -> Option<Option<PlaybackState>> {
        match payload {
            EventPayload::State(state) => Some(state.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PollKey {
    auto_update: bool,
    instance: Option<InstanceId>,
    has_state: bool,
    paused: bool,
    interval: Duration,
}

impl PollKey {
    fn should_poll(&self) -> bool {
        self.auto_update
            && self.instance.is_some()
            && self.has_state
            && !self.paused
            && !self.interval.is_zero()
    }
}

struct Poller {
    runtime: Handle,
    publisher: Weak<Publisher<PlaybackState>>,
    player: Option<PlayerHandle>,
    config: PollingConfig,
    key: Option<PollKey>,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    fn configure(&mut self, player: Option<PlayerHandle>, config: PollingConfig) {
        self.player = player;
        self.config = config;
    }

    fn reconcile(&mut self, state: &Option<PlaybackState>) {
        let key = PollKey {
            auto_update: self.config.auto_update,
            instance: self.player.as_ref().map(PlayerHandle::id),
            has_state: state.is_some(),
            paused: state.as_ref().is_some_and(|s| s.paused),
            interval: self.config.interval,
        };
        if self.key == Some(key) {
            return;
        }
        self.key = Some(key);
        self.stop();

        if !key.should_poll() {
            return;
        }
        let Some(handle) = self.player.clone() else {
            return;
        };

        let publisher = self.publisher.clone();
        let period = key.interval;
        let start = Instant::now() + period;
        debug!(
            instance = %handle.id(),
            interval_ms = period.as_millis() as u64,
            "Starting playback polling"
        );

        self.task = Some(self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = handle.instance().get_current_state().await;
                let Some(publisher) = publisher.upgrade() else {
                    break;
                };
                match result {
                    Ok(state) => {
                        trace!(instance = %handle.id(), "Polled playback state");
                        publisher.publish(state);
                    }
                    Err(e) => {
                        warn!(instance = %handle.id(), error = %e, "Failed to poll playback state")
                    }
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            trace!("Stopping playback polling");
            task.abort();
        }
    }

    fn reset(&mut self) {
        self.stop();
        self.player = None;
        self.key = None;
    }

    fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

/// Playback snapshot of the current player
pub struct PlaybackStateProvider {
    mirror: EventMirror<PlaybackMirror>,
    poller: Arc<Mutex<Poller>>,
}

impl PlaybackStateProvider {
    /// Must be called inside a tokio runtime; the poll timer runs on it
    pub fn new() -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| StateError::NoRuntime)?;
        let mirror = EventMirror::<PlaybackMirror>::new();
        let poller = Arc::new(Mutex::new(Poller {
            runtime,
            publisher: Arc::downgrade(mirror.publisher()),
            player: None,
            config: PollingConfig::default(),
            key: None,
            task: None,
        }));

        let weak = Arc::downgrade(&poller);
        mirror.publisher().on_publish(move |state| {
            if let Some(poller) = weak.upgrade() {
                poller.lock().reconcile(state);
            }
        });

        Ok(Self { mirror, poller })
    }

    pub fn render(&mut self, player: Option<&PlayerHandle>, config: &PollingConfig) {
        self.poller.lock().configure(player.cloned(), *config);
        self.mirror.render(player);

        let state = self.mirror.current();
        self.poller.lock().reconcile(&state);
    }

    /// Stop polling and drop every subscription
    pub fn unmount(&mut self) {
        self.poller.lock().reset();
        self.mirror.unmount();
        self.poller.lock().stop();
    }

    pub fn current(&self) -> Option<PlaybackState> {
        self.mirror.current()
    }

    /// Whether a refresh timer is alive
    pub fn is_polling(&self) -> bool {
        self.poller.lock().is_running()
    }

    pub fn provide(&self, scope: &mut Scope) {
        self.mirror.provide(scope);
    }
}

impl Drop for PlaybackStateProvider {
    fn drop(&mut self) {
        self.poller.lock().stop();
    }
}
