//! Event mirrors: republish player events as observable state
//!
//! An [`EventMirror`] follows the player handle it is rendered with. When the
//! handle's instance changes it deregisters every listener it holds on the old
//! instance, publishes `None`, and registers one listener per event of its
//! [`MirrorKind`] on the new instance. Listener callbacks write straight into
//! the mirror's [`Publisher`].

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tokio::sync::watch;
use tracing::{debug, trace, warn};
use web_playback_api::{EventPayload, ListenerId, PlayerEvent, PlayerRef};

use crate::lifecycle::{InstanceId, PlayerHandle};
use crate::scope::{Scope, StateContext};

/// What a mirror listens to and how payloads become values
pub trait MirrorKind: Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;

    /// Used in log fields
    const NAME: &'static str;

    const EVENTS: &'static [PlayerEvent];

    /// Value to publish for `payload` delivered on `event`
    ///
    /// `None` means the payload does not have the shape the event promises and
    /// is dropped.
    fn transform(event: PlayerEvent, payload: &EventPayload) -> Option<Option<Self::Value>>;
}

type PublishHook<V> = Box<dyn Fn(&Option<V>) + Send + Sync>;

/// Latest value of a mirror plus everyone watching it
pub struct Publisher<V> {
    tx: watch::Sender<Option<V>>,
    hook: OnceLock<PublishHook<V>>,
}

impl<V: Clone + Send + Sync + 'static> Publisher<V> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx,
            hook: OnceLock::new(),
        }
    }

    /// Replace the value and notify watchers, then the publish hook
    pub fn publish(&self, value: Option<V>) {
        match self.hook.get() {
            Some(hook) => {
                self.tx.send_replace(value.clone());
                hook(&value);
            }
            None => {
                self.tx.send_replace(value);
            }
        }
    }

    pub fn current(&self) -> Option<V> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<V>> {
        self.tx.subscribe()
    }

    /// Install the callback run after every publish; only the first one sticks
    pub fn on_publish<F>(&self, hook: F) -> bool
    where
        F: Fn(&Option<V>) + Send + Sync + 'static,
    {
        self.hook.set(Box::new(hook)).is_ok()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for Publisher<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One listener registration, removed from the player on drop
pub struct EventSubscription {
    player: PlayerRef,
    event: PlayerEvent,
    id: ListenerId,
}

impl EventSubscription {
    pub fn event(&self) -> PlayerEvent {
        self.event
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if !self.player.remove_listener(self.event, Some(self.id)) {
            debug!(event = %self.event, listener = %self.id, "Listener was already removed");
        }
    }
}

impl fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

struct Attachment {
    instance: InstanceId,
    _subscriptions: Vec<EventSubscription>,
}

pub struct EventMirror<K: MirrorKind> {
    publisher: Arc<Publisher<K::Value>>,
    attached: Option<Attachment>,
}

impl<K: MirrorKind> EventMirror<K> {
    pub fn new() -> Self {
        Self {
            publisher: Arc::new(Publisher::new()),
            attached: None,
        }
    }

    /// Follow `player`, re-subscribing only when its instance changed
    pub fn render(&mut self, player: Option<&PlayerHandle>) {
        let next = player.map(PlayerHandle::id);
        if self.attached.as_ref().map(|a| a.instance) == next {
            return;
        }

        self.detach();
        if let Some(handle) = player {
            self.attach(handle);
        }
    }

    /// Drop every subscription and publish `None`
    pub fn unmount(&mut self) {
        self.detach();
    }

    pub fn current(&self) -> Option<K::Value> {
        self.publisher.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<K::Value>> {
        self.publisher.subscribe()
    }

    pub fn publisher(&self) -> &Arc<Publisher<K::Value>> {
        &self.publisher
    }

    /// Instance the mirror is listening to
    pub fn attached_to(&self) -> Option<InstanceId> {
        self.attached.as_ref().map(|a| a.instance)
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn provide(&self, scope: &mut Scope) {
        scope.provide(StateContext::new(self.subscribe()));
    }

    fn attach(&mut self, handle: &PlayerHandle) {
        let player = handle.instance();
        let subscriptions = K::EVENTS
            .iter()
            .map(|&event| {
                let publisher = Arc::downgrade(&self.publisher);
                let id = player.add_listener(
                    event,
                    Arc::new(move |payload: &EventPayload| {
                        deliver::<K>(&publisher, event, payload)
                    }),
                );
                EventSubscription {
                    player: Arc::clone(player),
                    event,
                    id,
                }
            })
            .collect();

        debug!(
            mirror = K::NAME,
            instance = %handle.id(),
            events = K::EVENTS.len(),
            "Subscribed to player events"
        );
        self.attached = Some(Attachment {
            instance: handle.id(),
            _subscriptions: subscriptions,
        });
    }

    fn detach(&mut self) {
        if let Some(attachment) = self.attached.take() {
            debug!(
                mirror = K::NAME,
                instance = %attachment.instance,
                "Unsubscribing from player events"
            );
            drop(attachment);
            self.publisher.publish(None);
        }
    }
}

impl<K: MirrorKind> Default for EventMirror<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver<K: MirrorKind>(
    publisher: &Weak<Publisher<K::Value>>,
    event: PlayerEvent,
    payload: &EventPayload,
) {
    let Some(publisher) = publisher.upgrade() else {
        return;
    };
    match K::transform(event, payload) {
        Some(value) => {
            trace!(mirror = K::NAME, event = %event, "Mirroring event");
            publisher.publish(value);
        }
        None => warn!(
            mirror = K::NAME,
            event = %event,
            ?payload,
            "Ignoring payload with unexpected shape"
        ),
    }
}
