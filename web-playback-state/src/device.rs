//! Device announcements from `ready` / `not_ready`

use web_playback_api::{DeviceStatus, EventPayload, PlayerDevice, PlayerEvent};

use crate::lifecycle::PlayerHandle;
use crate::mirror::{EventMirror, MirrorKind};
use crate::scope::Scope;

pub struct DeviceMirror;

impl MirrorKind for DeviceMirror {
    type Value = PlayerDevice;
    const NAME: &'static str = "device";
    const EVENTS: &'static [PlayerEvent] = &[PlayerEvent::Ready, PlayerEvent::NotReady];

    fn transform(event: PlayerEvent, payload: &EventPayload) -> Option<Option<PlayerDevice>> {
        let status = match event {
            PlayerEvent::Ready => DeviceStatus::Ready,
            PlayerEvent::NotReady => DeviceStatus::NotReady,
            _ => return None,
        };
        match payload {
            EventPayload::Instance(instance) => {
                Some(Some(PlayerDevice::new(instance.device_id.clone(), status)))
            }
            _ => None,
        }
    }
}

/// Latest device announcement of the current player
#[derive(Default)]
pub struct DeviceStateProvider {
    mirror: EventMirror<DeviceMirror>,
}

impl DeviceStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, player: Option<&PlayerHandle>) {
        self.mirror.render(player);
    }

    pub fn unmount(&mut self) {
        self.mirror.unmount();
    }

    pub fn current(&self) -> Option<PlayerDevice> {
        self.mirror.current()
    }

    pub fn provide(&self, scope: &mut Scope) {
        self.mirror.provide(scope);
    }
}
