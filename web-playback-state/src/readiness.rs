//! One-shot signal that the vendor SDK finished loading

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use web_playback_api::SdkHost;

use crate::scope::{Context, Scope};

/// Flag that flips to `true` exactly once and never resets
#[derive(Clone)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Flip the flag; returns `true` only for the first call
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Context exposing the readiness flag to hooks
#[derive(Clone)]
pub struct ReadyContext {
    rx: watch::Receiver<bool>,
}

impl ReadyContext {
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the SDK is ready (immediately if it already is)
    pub async fn wait(&mut self) -> bool {
        self.rx.wait_for(|ready| *ready).await.is_ok()
    }
}

impl Context for ReadyContext {}

/// Owns the readiness signal of one provider tree
#[derive(Clone, Default)]
pub struct ReadinessProvider {
    signal: ReadySignal,
}

impl ReadinessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the target of the host's SDK-ready callback
    ///
    /// `on_ready` runs once, right after the flag flips, so dependents can
    /// re-render. Later invocations of the host callback are ignored.
    pub fn listen<F>(&self, host: &dyn SdkHost, on_ready: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let signal = self.signal.clone();
        host.on_sdk_ready(Arc::new(move || {
            if signal.fire() {
                info!("Web Playback SDK ready");
                on_ready();
            } else {
                debug!("Ignoring repeated SDK ready callback");
            }
        }));
    }

    pub fn is_ready(&self) -> bool {
        self.signal.is_ready()
    }

    pub fn signal(&self) -> &ReadySignal {
        &self.signal
    }

    pub fn provide(&self, scope: &mut Scope) {
        scope.provide(ReadyContext {
            rx: self.signal.subscribe(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use web_playback_api::mock::MockHost;

    #[test]
    fn test_fire_flips_once() {
        let signal = ReadySignal::new();
        assert!(!signal.is_ready());

        assert!(signal.fire());
        assert!(signal.is_ready());
        assert!(!signal.fire());
        assert!(signal.is_ready());
    }

    #[test]
    fn test_host_callback_triggers_single_rerender() {
        let host = MockHost::new();
        let provider = ReadinessProvider::new();
        let renders = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&renders);

        provider.listen(&host, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(host.has_ready_callback());
        assert!(!provider.is_ready());

        host.make_sdk_ready();
        host.make_sdk_ready();

        assert!(provider.is_ready());
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_context_reflects_signal() {
        let provider = ReadinessProvider::new();
        let mut scope = Scope::new();
        provider.provide(&mut scope);

        let context = scope.lookup::<ReadyContext>().unwrap();
        assert!(!context.is_ready());

        provider.signal().fire();
        assert!(context.is_ready());
    }

    #[tokio::test]
    async fn test_wait_resolves_after_fire() {
        let provider = ReadinessProvider::new();
        let mut scope = Scope::new();
        provider.provide(&mut scope);
        let mut context = scope.lookup::<ReadyContext>().unwrap();

        let signal = provider.signal().clone();
        tokio::spawn(async move {
            signal.fire();
        });

        assert!(context.wait().await);
    }
}
