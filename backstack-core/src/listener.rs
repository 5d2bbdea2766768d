//! Listener trait and subscription records.
//!
//! A [`BackListener`] is invoked with the event payload and a [`Next`]
//! handle. The chain advances only when the listener calls
//! [`Next::proceed`]; a listener that returns without proceeding keeps the
//! event for itself and the rest of the chain never sees it.
//!
//! Listeners are invoked synchronously but may finish their work later:
//! `Next` is `Send + 'static`, so a listener can move it into a spawned task
//! and resume the chain from there.

use crate::chain::Next;
use crate::event::Payload;
use std::sync::Arc;

/// A participant in the back-navigation chain.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `BackListener<{E}>`",
    label = "missing `BackListener` implementation",
    note = "Listeners must implement `on_back` for the payload type `{E}`."
)]
pub trait BackListener<E: Payload>: Send + Sync + 'static {
    /// Called once per dispatched event that reaches this listener.
    ///
    /// Call `next.proceed()` to let lower-priority listeners run. Keeping or
    /// dropping `next` without proceeding stops propagation for this event.
    fn on_back(&self, event: &E, next: Next<E>);
}

/// Adapter that lets a plain closure act as a [`BackListener`].
pub struct FnListener<F> {
    f: F,
}

impl<E, F> BackListener<E> for FnListener<F>
where
    E: Payload,
    F: Fn(&E, Next<E>) + Send + Sync + 'static,
{
    fn on_back(&self, event: &E, next: Next<E>) {
        (self.f)(event, next);
    }
}

/// Wrap a closure as a [`BackListener`].
///
/// # Example
///
/// ```rust,ignore
/// let listener = listener_fn(|_event: &BackEvent, next: Next<BackEvent>| {
///     next.proceed();
/// });
/// ```
pub fn listener_fn<E, F>(f: F) -> FnListener<F>
where
    E: Payload,
    F: Fn(&E, Next<E>) + Send + Sync + 'static,
{
    FnListener { f }
}

/// A registered listener: identity, priority, and the listener itself.
///
/// The `id` is the identity key for removal and must be unique among
/// currently registered subscriptions. Higher `priority` runs earlier;
/// subscriptions with equal priority keep their insertion order.
pub struct Subscription<E: Payload> {
    id: String,
    priority: i32,
    listener: Arc<dyn BackListener<E>>,
}

impl<E: Payload> Subscription<E> {
    /// Create a subscription from any [`BackListener`] implementation.
    pub fn new(id: impl Into<String>, priority: i32, listener: impl BackListener<E>) -> Self {
        Self {
            id: id.into(),
            priority,
            listener: Arc::new(listener),
        }
    }

    /// Create a subscription from a closure.
    pub fn from_fn<F>(id: impl Into<String>, priority: i32, f: F) -> Self
    where
        F: Fn(&E, Next<E>) + Send + Sync + 'static,
    {
        Self::new(id, priority, listener_fn(f))
    }

    /// The identity key used for removal.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Higher runs earlier.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The listener invoked when a chain reaches this subscription.
    pub fn listener(&self) -> &Arc<dyn BackListener<E>> {
        &self.listener
    }
}

impl<E: Payload> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
