//! Vendor error events republished as data

use web_playback_api::{ErrorState, EventPayload, PlayerEvent};

use crate::lifecycle::PlayerHandle;
use crate::mirror::{EventMirror, MirrorKind};
use crate::scope::Scope;

pub struct ErrorMirror;

impl MirrorKind for ErrorMirror {
    type Value = ErrorState;
    const NAME: &'static str = "error";
    const EVENTS: &'static [PlayerEvent] = &[
        PlayerEvent::InitializationError,
        PlayerEvent::AuthenticationError,
        PlayerEvent::AccountError,
        PlayerEvent::PlaybackError,
    ];

    fn transform(event: PlayerEvent, payload: &EventPayload) -> Option<Option<ErrorState>> {
        let kind = event.error_kind()?;
        match payload {
            EventPayload::Error(error) => Some(Some(ErrorState::new(kind, error.message.clone()))),
            _ => None,
        }
    }
}

/// Most recent error reported by the current player
///
/// Errors never surface as `Err` anywhere in the state layer; consumers read
/// them from here.
#[derive(Default)]
pub struct ErrorStateProvider {
    mirror: EventMirror<ErrorMirror>,
}

impl ErrorStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, player: Option<&PlayerHandle>) {
        self.mirror.render(player);
    }

    pub fn unmount(&mut self) {
        self.mirror.unmount();
    }

    pub fn current(&self) -> Option<ErrorState> {
        self.mirror.current()
    }

    pub fn provide(&self, scope: &mut Scope) {
        self.mirror.provide(scope);
    }
}
