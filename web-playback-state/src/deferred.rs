//! Debounced effects keyed by a dependency value
//!
//! [`DeferredEffect`] runs an async effect some time after its dependency
//! changed. A change arriving before the delay elapsed aborts the pending run
//! and restarts the delay, so the effect runs at most once per settled value.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delay used when none is configured
pub const DEFAULT_DEFERRED_DELAY: Duration = Duration::from_millis(1000);

pub struct DeferredEffect<K> {
    delay: Duration,
    runtime: Handle,
    deps: Option<K>,
    skip_initial: bool,
    pending: Option<JoinHandle<()>>,
}

impl<K: PartialEq> DeferredEffect<K> {
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            deps: None,
            skip_initial: false,
            pending: None,
        }
    }

    /// Record the first dependency value without scheduling the effect
    ///
    /// For values that were already applied by other means at mount time.
    pub fn skip_initial(mut self) -> Self {
        self.skip_initial = true;
        self
    }

    /// Report the current dependency value
    ///
    /// Schedules `effect` when `deps` differs from the previous value and
    /// returns whether it did. An unchanged value keeps any pending run.
    pub fn update<F, Fut>(&mut self, deps: K, effect: F) -> bool
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.deps.as_ref() == Some(&deps) {
            return false;
        }

        let initial = self.deps.is_none();
        self.deps = Some(deps);
        self.cancel();

        if initial && self.skip_initial {
            return false;
        }

        let deadline = Instant::now() + self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            effect().await;
        }));
        true
    }
}

impl<K> DeferredEffect<K> {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay used by future schedules
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Abort the pending run, if any
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<K> Drop for DeferredEffect<K> {
    fn drop(&mut self) {
        self.cancel();
    }
}
