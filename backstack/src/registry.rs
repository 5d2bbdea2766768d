//! Subscription registry.
//!
//! Keeps the live, ordered set of subscriptions and hands out point-in-time
//! snapshots for dispatch. The registry is mutated only through
//! [`subscribe`](SubscriptionRegistry::subscribe) and
//! [`unsubscribe`](SubscriptionRegistry::unsubscribe); a chain in progress
//! never touches it, it walks the snapshot it was given.

use backstack_core::{Payload, SubscribeError, Subscription};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered collection of active subscriptions.
///
/// Invariant: entries are sorted by descending priority at all times, and
/// entries with equal priority keep their insertion order.
pub struct SubscriptionRegistry<E: Payload> {
    entries: Mutex<Vec<Arc<Subscription<E>>>>,
}

impl<E: Payload> SubscriptionRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Subscription<E>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a subscription at its priority position.
    ///
    /// Equal priorities are inserted after existing entries, so registration
    /// order decides ties. An id that is already registered is refused.
    pub fn subscribe(&self, subscription: Subscription<E>) -> Result<(), SubscribeError> {
        let mut entries = self.lock();
        if entries.iter().any(|e| e.id() == subscription.id()) {
            return Err(SubscribeError::DuplicateId(subscription.id().to_owned()));
        }
        let at = entries.partition_point(|e| e.priority() >= subscription.priority());
        entries.insert(at, Arc::new(subscription));
        Ok(())
    }

    /// Remove the subscription with this id.
    ///
    /// An unknown id is a no-op: callers may unsubscribe defensively during
    /// teardown without tracking whether registration ever happened.
    pub fn unsubscribe(&self, id: &str) {
        let mut entries = self.lock();
        if let Some(at) = entries.iter().position(|e| e.id() == id) {
            entries.remove(at);
        }
    }

    /// A point-in-time copy of the current order.
    ///
    /// O(n) over shared `Arc`s; later mutation of the live registry does not
    /// affect a snapshot already taken.
    pub fn snapshot(&self) -> Vec<Arc<Subscription<E>>> {
        self.lock().clone()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<E: Payload> Default for SubscriptionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Payload> std::fmt::Debug for SubscriptionRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("len", &self.len())
            .finish()
    }
}
