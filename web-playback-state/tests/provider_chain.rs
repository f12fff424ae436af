//! Integration tests wiring the providers together by hand
//!
//! The composite in `web-playback-sdk` does this wiring for applications; here
//! the chain is driven directly so each step of a render is visible.

use std::sync::Arc;
use std::time::Duration;

use web_playback_api::mock::MockHost;
use web_playback_api::{
    DeviceStatus, ErrorKind, ErrorState, EventPayload, PlaybackState, PlayerDevice, PlayerEvent,
    WebPlaybackError, WebPlaybackInstance,
};
use web_playback_state::{
    DeviceStateProvider, ErrorStateProvider, PlaybackStateProvider, PlayerConfig, PlayerHandle,
    PlayerProvider, PollingConfig, ReadinessProvider, ReadyContext, Scope, StateContext,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct Chain {
    readiness: ReadinessProvider,
    player: PlayerProvider,
    device: DeviceStateProvider,
    playback: PlaybackStateProvider,
    errors: ErrorStateProvider,
    config: PlayerConfig,
    polling: PollingConfig,
}

impl Chain {
    fn new(host: &Arc<MockHost>) -> Self {
        let config = PlayerConfig {
            device_name: "Chain Test".to_string(),
            volume: Some(0.5),
            get_oauth_token: Arc::new(|callback| callback("token".to_string())),
            connect_on_initialized: true,
        };
        let readiness = ReadinessProvider::new();
        readiness.listen(&**host, || {});

        Self {
            readiness,
            player: PlayerProvider::new(host.clone(), &config).unwrap(),
            device: DeviceStateProvider::new(),
            playback: PlaybackStateProvider::new().unwrap(),
            errors: ErrorStateProvider::new(),
            config,
            polling: PollingConfig::default(),
        }
    }

    fn render(&mut self) {
        self.player.render(self.readiness.is_ready(), &self.config);
        let handle = self.player.handle();
        self.device.render(handle.as_ref());
        self.playback.render(handle.as_ref(), &self.polling);
        self.errors.render(handle.as_ref());
    }

    fn unmount(&mut self) {
        self.errors.unmount();
        self.playback.unmount();
        self.device.unmount();
        self.player.unmount();
    }

    fn scope(&self) -> Scope {
        let mut scope = Scope::new();
        self.readiness.provide(&mut scope);
        self.player.provide(&mut scope);
        self.device.provide(&mut scope);
        self.playback.provide(&mut scope);
        self.errors.provide(&mut scope);
        scope
    }
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn playing() -> PlaybackState {
    PlaybackState {
        paused: false,
        position: 1_000,
        ..PlaybackState::default()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_nothing_exists_before_ready() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    chain.render();

    let scope = chain.scope();
    assert!(!scope.lookup::<ReadyContext>().unwrap().is_ready());
    assert!(scope.lookup::<StateContext<PlayerHandle>>().unwrap().current().is_none());
    assert!(scope.lookup::<StateContext<PlayerDevice>>().unwrap().current().is_none());
    assert_eq!(host.player_count(), 0);
}

#[tokio::test]
async fn test_ready_constructs_and_mirrors_attach() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    chain.render();

    host.make_sdk_ready();
    chain.render();

    let player = host.last_player().unwrap();
    assert_eq!(host.player_count(), 1);
    assert_eq!(player.connect_calls(), 1);
    assert_eq!(player.listener_count(PlayerEvent::Ready), 1);
    assert_eq!(player.listener_count(PlayerEvent::NotReady), 1);
    assert_eq!(player.listener_count(PlayerEvent::PlayerStateChanged), 1);
    assert_eq!(player.listener_count(PlayerEvent::InitializationError), 1);
    assert_eq!(player.listener_count(PlayerEvent::AuthenticationError), 1);
    assert_eq!(player.listener_count(PlayerEvent::AccountError), 1);
    assert_eq!(player.listener_count(PlayerEvent::PlaybackError), 1);
    assert_eq!(player.listener_count(PlayerEvent::AutoplayFailed), 0);
}

#[tokio::test]
async fn test_events_reach_scope_contexts() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    host.make_sdk_ready();
    chain.render();
    let scope = chain.scope();
    let player = host.last_player().unwrap();

    player.fire_event(PlayerEvent::Ready, EventPayload::Instance(WebPlaybackInstance::new("abc")));
    player.fire_event(
        PlayerEvent::AccountError,
        EventPayload::Error(WebPlaybackError::new("premium required")),
    );

    assert_eq!(
        scope.lookup::<StateContext<PlayerDevice>>().unwrap().current(),
        Some(PlayerDevice::new("abc", DeviceStatus::Ready))
    );
    assert_eq!(
        scope.lookup::<StateContext<ErrorState>>().unwrap().current(),
        Some(ErrorState::new(ErrorKind::AccountError, "premium required"))
    );
}

#[tokio::test]
async fn test_reconstruction_moves_every_mirror() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    host.make_sdk_ready();
    chain.render();
    let first = host.last_player().unwrap();
    first.fire_event(PlayerEvent::Ready, EventPayload::Instance(WebPlaybackInstance::new("abc")));

    chain.config.connect_on_initialized = false;
    chain.render();

    let second = host.last_player().unwrap();
    assert_eq!(host.player_count(), 2);
    assert_eq!(first.disconnect_calls(), 1);
    assert_eq!(first.total_listener_count(), 0);
    assert_eq!(second.total_listener_count(), 7);
    assert_eq!(second.connect_calls(), 0);
    assert_eq!(chain.device.current(), None);
}

#[tokio::test]
async fn test_unmount_releases_everything() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    host.make_sdk_ready();
    chain.render();
    let player = host.last_player().unwrap();

    chain.unmount();

    assert_eq!(player.total_listener_count(), 0);
    assert_eq!(player.disconnect_calls(), 1);
    assert!(chain.player.handle().is_none());
}

// ============================================================================
// Polling and watchers
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_watcher_sees_polled_snapshot() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    host.make_sdk_ready();
    chain.render();
    let player = host.last_player().unwrap();
    let mut watcher = chain.scope().lookup::<StateContext<PlaybackState>>().unwrap().watch();

    player.fire_event(PlayerEvent::PlayerStateChanged, EventPayload::State(Some(playing())));
    watcher.changed().await.unwrap();
    assert_eq!(watcher.current(), Some(playing()));

    let polled = PlaybackState {
        position: 2_000,
        ..playing()
    };
    player.set_current_state_for_testing(Some(polled.clone()));
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;

    assert!(watcher.has_changed());
    assert_eq!(watcher.current(), Some(polled));
    assert_eq!(player.get_current_state_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rename_reaches_the_live_player() {
    let host = Arc::new(MockHost::new());
    let mut chain = Chain::new(&host);
    host.make_sdk_ready();
    chain.render();

    chain.config.device_name = "Living Room".to_string();
    chain.render();
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;

    let player = host.last_player().unwrap();
    assert_eq!(player.set_name_calls(), vec!["Living Room".to_string()]);
    assert_eq!(host.player_count(), 1);
}
