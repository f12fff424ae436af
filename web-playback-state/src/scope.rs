//! Enclosing scope for reading provider state
//!
//! Providers register a context value in a [`Scope`]; hooks look it up by
//! type. A scope without the requested context is the "not wrapped" case and
//! yields [`StateError::NotWrapped`], which is distinct from a context that is
//! present but holds no value yet.
//!
//! ```rust,ignore
//! let mut scope = Scope::new();
//! assert!(scope.lookup::<ReadyContext>().is_err());
//!
//! readiness.provide(&mut scope);
//! assert!(!scope.lookup::<ReadyContext>()?.is_ready());
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::watcher::StateWatcher;
use crate::{Result, StateError};

/// Marker for values a provider can place in a scope
///
/// Contexts are cheap handles (channel receivers); looking one up clones it.
pub trait Context: Clone + Send + Sync + 'static {}

/// Type-keyed set of contexts provided by mounted providers
#[derive(Clone, Default)]
pub struct Scope {
    contexts: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Scope {
    /// An empty scope, as seen by code outside every provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context, replacing one of the same type
    ///
    /// Returns `true` if a context of this type was already present.
    pub fn provide<C: Context>(&mut self, context: C) -> bool {
        self.contexts
            .insert(TypeId::of::<C>(), Arc::new(context))
            .is_some()
    }

    pub fn get<C: Context>(&self) -> Option<C> {
        self.contexts
            .get(&TypeId::of::<C>())
            .and_then(|boxed| boxed.downcast_ref::<C>())
            .cloned()
    }

    /// Like [`Scope::get`], failing with `NotWrapped` when absent
    pub fn lookup<C: Context>(&self) -> Result<C> {
        self.get::<C>().ok_or_else(|| {
            tracing::trace!(
                context = std::any::type_name::<C>(),
                "context lookup outside provider"
            );
            StateError::NotWrapped
        })
    }

    pub fn contains<C: Context>(&self) -> bool {
        self.contexts.contains_key(&TypeId::of::<C>())
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("context_count", &self.contexts.len())
            .finish()
    }
}

/// Context carrying the latest value published by one provider
///
/// `current()` is `None` until the provider publishes something, or while the
/// player it depends on is absent.
pub struct StateContext<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T> StateContext<T> {
    pub(crate) fn new(rx: watch::Receiver<Option<T>>) -> Self {
        Self { rx }
    }
}

impl<T: Clone> StateContext<T> {
    pub fn current(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    pub fn watch(&self) -> StateWatcher<T> {
        StateWatcher::new(self.rx.clone())
    }
}

impl<T> Clone for StateContext<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> fmt::Debug for StateContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateContext")
            .field("has_value", &self.rx.borrow().is_some())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Context for StateContext<T> {}
