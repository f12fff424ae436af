//! In-memory player and host for tests
//!
//! Enabled with the `test-support` feature. `MockPlayer` records every call
//! and keeps its listeners in a map so tests can fire events and count
//! registrations; `MockHost` plays the part of the page that loads the vendor
//! script and constructs players.

use std::collections::HashMap;
use std::future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::error::{ApiError, Result};
use crate::event::{EventPayload, Listener, ListenerId, PlayerEvent};
use crate::host::{ReadyCallback, ScriptId, SdkHost};
use crate::model::PlaybackState;
use crate::player::{Player, PlayerFactory, PlayerInit, PlayerRef};

/// A call made on a [`MockPlayer`]
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    Connect,
    Disconnect,
    GetCurrentState,
    GetVolume,
    NextTrack,
    Pause,
    PreviousTrack,
    Resume,
    Seek(u64),
    TogglePlay,
    SetName(String),
    SetVolume(f32),
    ActivateElement,
}

pub struct MockPlayer {
    init: PlayerInit,
    listeners: Mutex<HashMap<PlayerEvent, Vec<(ListenerId, Listener)>>>,
    next_listener: AtomicU64,
    current_state: Mutex<Result<Option<PlaybackState>>>,
    calls: Mutex<Vec<PlayerCall>>,
}

impl MockPlayer {
    pub fn new(init: PlayerInit) -> Self {
        Self {
            init,
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
            current_state: Mutex::new(Ok(None)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Name the player was constructed with
    pub fn name(&self) -> &str {
        &self.init.name
    }

    /// Volume the player was constructed with
    pub fn initial_volume(&self) -> Option<f32> {
        self.init.volume
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &PlayerCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn connect_calls(&self) -> usize {
        self.count(&PlayerCall::Connect)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.count(&PlayerCall::Disconnect)
    }

    pub fn get_current_state_calls(&self) -> usize {
        self.count(&PlayerCall::GetCurrentState)
    }

    pub fn set_name_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                PlayerCall::SetName(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn set_volume_calls(&self) -> Vec<f32> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                PlayerCall::SetVolume(volume) => Some(*volume),
                _ => None,
            })
            .collect()
    }

    /// Number of listeners currently registered for `event`
    pub fn listener_count(&self, event: PlayerEvent) -> usize {
        self.listeners.lock().get(&event).map_or(0, Vec::len)
    }

    pub fn total_listener_count(&self) -> usize {
        self.listeners.lock().values().map(Vec::len).sum()
    }

    /// Deliver `payload` to every listener registered for `event`
    pub fn fire_event(&self, event: PlayerEvent, payload: EventPayload) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .get(&event)
            .map(|registered| registered.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        for listener in listeners {
            listener(&payload);
        }
    }

    /// Value future `get_current_state` calls resolve to
    pub fn set_current_state_for_testing(&self, state: Option<PlaybackState>) {
        *self.current_state.lock() = Ok(state);
    }

    /// Make future `get_current_state` calls fail
    pub fn fail_current_state_for_testing(&self, error: ApiError) {
        *self.current_state.lock() = Err(error);
    }

    /// Ask the player's token callback for a token, as the vendor would
    ///
    /// Returns `None` if the callback did not answer synchronously.
    pub fn request_token(&self) -> Option<String> {
        let slot = Arc::new(Mutex::new(None));
        let answer = Arc::clone(&slot);
        (self.init.get_oauth_token)(Box::new(move |token| {
            *answer.lock() = Some(token);
        }));
        let token = slot.lock().take();
        token
    }

    fn record(&self, call: PlayerCall) {
        self.calls.lock().push(call);
    }

    fn done<T: Send + 'static>(value: T) -> BoxFuture<'static, Result<T>> {
        Box::pin(future::ready(Ok(value)))
    }
}

impl Player for MockPlayer {
    fn connect(&self) -> BoxFuture<'static, Result<bool>> {
        self.record(PlayerCall::Connect);
        Self::done(true)
    }

    fn disconnect(&self) {
        self.record(PlayerCall::Disconnect);
    }

    fn add_listener(&self, event: PlayerEvent, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .entry(event)
            .or_default()
            .push((id, listener));
        id
    }

    fn remove_listener(&self, event: PlayerEvent, id: Option<ListenerId>) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(registered) = listeners.get_mut(&event) else {
            return false;
        };

        match id {
            Some(id) => {
                let before = registered.len();
                registered.retain(|(registered_id, _)| *registered_id != id);
                before != registered.len()
            }
            None => {
                let removed = !registered.is_empty();
                registered.clear();
                removed
            }
        }
    }

    fn get_current_state(&self) -> BoxFuture<'static, Result<Option<PlaybackState>>> {
        self.record(PlayerCall::GetCurrentState);
        let state = self.current_state.lock().clone();
        Box::pin(future::ready(state))
    }

    fn get_volume(&self) -> BoxFuture<'static, Result<f32>> {
        self.record(PlayerCall::GetVolume);
        Self::done(self.init.volume.unwrap_or(1.0))
    }

    fn next_track(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::NextTrack);
        Self::done(())
    }

    fn pause(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::Pause);
        Self::done(())
    }

    fn previous_track(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::PreviousTrack);
        Self::done(())
    }

    fn resume(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::Resume);
        Self::done(())
    }

    fn seek(&self, position_ms: u64) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::Seek(position_ms));
        Self::done(())
    }

    fn toggle_play(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::TogglePlay);
        Self::done(())
    }

    fn set_name(&self, name: String) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::SetName(name));
        Self::done(())
    }

    fn set_volume(&self, volume: f32) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::SetVolume(volume));
        if !(0.0..=1.0).contains(&volume) {
            return Box::pin(future::ready(Err(ApiError::invalid_volume(volume))));
        }
        Self::done(())
    }

    fn activate_element(&self) -> BoxFuture<'static, Result<()>> {
        self.record(PlayerCall::ActivateElement);
        Self::done(())
    }
}

/// Host that records injected scripts and the installed ready callback
#[derive(Default)]
pub struct MockHost {
    ready_callback: Mutex<Option<ReadyCallback>>,
    scripts: Mutex<Vec<(ScriptId, String)>>,
    next_script: AtomicU64,
    players: Mutex<Vec<Arc<MockPlayer>>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the vendor script finishing its load
    ///
    /// Returns `false` if nobody installed a ready callback.
    pub fn make_sdk_ready(&self) -> bool {
        let callback = self.ready_callback.lock().clone();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn has_ready_callback(&self) -> bool {
        self.ready_callback.lock().is_some()
    }

    /// Sources of the scripts currently injected
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().iter().map(|(_, src)| src.clone()).collect()
    }

    /// Every player constructed so far, oldest first
    pub fn players(&self) -> Vec<Arc<MockPlayer>> {
        self.players.lock().clone()
    }

    pub fn player_count(&self) -> usize {
        self.players.lock().len()
    }

    pub fn last_player(&self) -> Option<Arc<MockPlayer>> {
        self.players.lock().last().cloned()
    }
}

impl SdkHost for MockHost {
    fn inject_script(&self, src: &str) -> ScriptId {
        let id = ScriptId::new(self.next_script.fetch_add(1, Ordering::Relaxed));
        self.scripts.lock().push((id, src.to_string()));
        id
    }

    fn remove_script(&self, id: ScriptId) {
        self.scripts.lock().retain(|(script, _)| *script != id);
    }

    fn on_sdk_ready(&self, callback: ReadyCallback) {
        *self.ready_callback.lock() = Some(callback);
    }
}

impl PlayerFactory for MockHost {
    fn create_player(&self, init: PlayerInit) -> PlayerRef {
        let player = Arc::new(MockPlayer::new(init));
        self.players.lock().push(Arc::clone(&player));
        player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WebPlaybackInstance;
    use std::sync::atomic::AtomicUsize;

    fn init(name: &str) -> PlayerInit {
        PlayerInit {
            name: name.to_string(),
            get_oauth_token: Arc::new(|callback| callback("token".to_string())),
            volume: Some(0.5),
        }
    }

    #[test]
    fn test_listener_registration_is_symmetric() {
        let player = MockPlayer::new(init("test device"));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let id = player.add_listener(
            PlayerEvent::Ready,
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(player.listener_count(PlayerEvent::Ready), 1);

        player.fire_event(
            PlayerEvent::Ready,
            EventPayload::Instance(WebPlaybackInstance::new("device_id")),
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(player.remove_listener(PlayerEvent::Ready, Some(id)));
        assert!(!player.remove_listener(PlayerEvent::Ready, Some(id)));
        assert_eq!(player.listener_count(PlayerEvent::Ready), 0);
    }

    #[test]
    fn test_remove_all_listeners_for_event() {
        let player = MockPlayer::new(init("test device"));
        player.add_listener(PlayerEvent::NotReady, Arc::new(|_| {}));
        player.add_listener(PlayerEvent::NotReady, Arc::new(|_| {}));
        player.add_listener(PlayerEvent::Ready, Arc::new(|_| {}));

        assert!(player.remove_listener(PlayerEvent::NotReady, None));
        assert_eq!(player.listener_count(PlayerEvent::NotReady), 0);
        assert_eq!(player.total_listener_count(), 1);
    }

    #[test]
    fn test_request_token_uses_init_callback() {
        let player = MockPlayer::new(init("test device"));
        assert_eq!(player.request_token().as_deref(), Some("token"));
    }

    #[test]
    fn test_host_ready_callback_and_scripts() {
        let host = MockHost::new();
        assert!(!host.make_sdk_ready());

        let id = host.inject_script("https://example.test/sdk.js");
        assert_eq!(host.scripts(), vec!["https://example.test/sdk.js".to_string()]);
        host.remove_script(id);
        assert!(host.scripts().is_empty());

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        host.on_sdk_ready(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(host.make_sdk_ready());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_factory_tracks_players() {
        let host = MockHost::new();
        host.create_player(init("a"));
        host.create_player(init("b"));

        assert_eq!(host.player_count(), 2);
        assert_eq!(host.last_player().unwrap().name(), "b");
    }
}
