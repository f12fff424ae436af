//! StateWatcher - await changes of a published value

use std::time::Duration;

use tokio::sync::watch;

use crate::{Result, StateError};

/// Receives every value a provider publishes
///
/// Hooks answer "what is the value now"; a watcher additionally lets async
/// consumers wait for the next change instead of re-reading on a timer.
///
/// ```rust,ignore
/// let mut watcher = watch_playback_state(sdk.scope())?;
/// while watcher.changed().await.is_ok() {
///     if let Some(state) = watcher.current() {
///         println!("position: {}ms", state.position);
///     }
/// }
/// ```
pub struct StateWatcher<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> StateWatcher<T> {
    pub(crate) fn new(rx: watch::Receiver<Option<T>>) -> Self {
        Self { rx }
    }

    /// Latest published value, marking it as seen
    pub fn current(&mut self) -> Option<T> {
        self.rx.borrow_and_update().clone()
    }

    /// Latest published value without marking it as seen
    pub fn peek(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Wait until a value is published that has not been seen yet
    ///
    /// Fails once the provider is gone.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx.changed().await.map_err(|_| StateError::WatcherClosed)
    }

    /// Wait for the next published value, up to `timeout`
    ///
    /// Returns `None` on timeout or when the provider is gone.
    pub async fn next_timeout(&mut self, timeout: Duration) -> Option<Option<T>> {
        match tokio::time::timeout(timeout, self.rx.changed()).await {
            Ok(Ok(())) => Some(self.current()),
            _ => None,
        }
    }

    /// Whether a value was published since the last `current()` / `changed()`
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

impl<T> Clone for StateWatcher<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_changed_sees_new_value() {
        let (tx, rx) = watch::channel::<Option<u32>>(None);
        let mut watcher = StateWatcher::new(rx);
        assert!(!watcher.has_changed());

        tx.send_replace(Some(5));
        assert!(watcher.has_changed());
        watcher.changed().await.unwrap();
        assert_eq!(watcher.current(), Some(5));
        assert!(!watcher.has_changed());
    }

    #[tokio::test]
    async fn test_changed_fails_once_provider_is_gone() {
        let (tx, rx) = watch::channel::<Option<u32>>(None);
        let mut watcher = StateWatcher::new(rx);
        drop(tx);

        assert_eq!(watcher.changed().await, Err(StateError::WatcherClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_timeout_expires() {
        let (_tx, rx) = watch::channel::<Option<u32>>(None);
        let mut watcher = StateWatcher::new(rx);

        assert_eq!(watcher.next_timeout(Duration::from_millis(50)).await, None);
    }
}
