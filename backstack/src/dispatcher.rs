//! Event dispatcher.
//!
//! Pairs the live [`SubscriptionRegistry`] with the per-event chain walk: on
//! each incoming event it snapshots the registry and starts a [`Chain`] over
//! the snapshot. Subscribe and unsubscribe calls made while a chain is in
//! flight (including from inside a listener) affect future events only.

use crate::registry::SubscriptionRegistry;
use backstack_core::{Chain, Payload, SubscribeError, Subscription};

/// Dispatches back-navigation events to registered subscriptions.
pub struct BackDispatcher<E: Payload> {
    registry: SubscriptionRegistry<E>,
}

impl<E: Payload> BackDispatcher<E> {
    /// Create a dispatcher with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: SubscriptionRegistry::new(),
        }
    }

    /// Register a subscription for future events.
    pub fn subscribe(&self, subscription: Subscription<E>) -> Result<(), SubscribeError> {
        self.registry.subscribe(subscription)
    }

    /// Remove the subscription with this id; unknown ids are ignored.
    pub fn unsubscribe(&self, id: &str) {
        self.registry.unsubscribe(id)
    }

    /// Dispatch one event through the current subscriptions.
    ///
    /// Takes a snapshot of the registry at this instant and walks it from
    /// highest to lowest priority. Listeners that proceed synchronously run
    /// before this returns; the returned [`Chain`] can be used to observe a
    /// walk that is still waiting on an asynchronous continuation.
    ///
    /// Overlapping dispatches are independent: a second event gets its own
    /// snapshot and walk even if the first chain has not resolved.
    ///
    /// # Panics
    ///
    /// Does not catch listener panics: a listener that panics synchronously
    /// unwinds out of this call and the chain is left halted at its
    /// position. Future events are unaffected.
    pub fn dispatch(&self, event: E) -> Chain<E> {
        let snapshot = self.registry.snapshot();
        #[cfg(feature = "tracing")]
        tracing::debug!(listeners = snapshot.len(), "dispatching back event");
        Chain::begin(event, snapshot)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<E: Payload> Default for BackDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Payload> std::fmt::Debug for BackDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackDispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}
