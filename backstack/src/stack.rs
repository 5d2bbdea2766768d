//! Application-facing handle.
//!
//! [`BackStack`] is the one object an application constructs at startup and
//! hands to every consumer that wants back-navigation dispatch. It replaces
//! a process-wide singleton accessor: the handle is `Clone` (Arc-backed), so
//! shell code, navigation, and modals all share the same dispatcher without
//! any implicit global.

use crate::dispatcher::BackDispatcher;
use crate::source::BackSource;
use backstack_core::{Chain, Payload, SubscribeError, Subscription};
use std::sync::Arc;

struct Inner<E: Payload> {
    dispatcher: BackDispatcher<E>,
    source: Box<dyn BackSource<E>>,
}

/// Shared handle over one dispatcher and its hardware source.
///
/// # Example
///
/// ```rust,ignore
/// let stack = BackStack::new(CapacitorBridge::new(app));
/// stack.listen();
///
/// stack.subscribe(Subscription::from_fn("nav", 10, |event: &BackEvent, next| {
///     if event.can_go_back { /* pop our own history */ } else { next.proceed(); }
/// }))?;
/// ```
pub struct BackStack<E: Payload> {
    inner: Arc<Inner<E>>,
}

impl<E: Payload> BackStack<E> {
    /// Create a handle over `source` with no subscriptions.
    pub fn new(source: impl BackSource<E> + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher: BackDispatcher::new(),
                source: Box::new(source),
            }),
        }
    }

    /// Start building a handle with initial subscriptions.
    pub fn builder(source: impl BackSource<E> + 'static) -> BackStackBuilder<E> {
        BackStackBuilder {
            source: Box::new(source),
            initial: Vec::new(),
        }
    }

    /// Bind the dispatcher to the hardware source.
    ///
    /// Registers exactly one handler per call; events delivered by the source
    /// from then on are dispatched through the current subscriptions.
    pub fn listen(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(source = self.inner.source.name(), "binding back-event handler");
        let inner = Arc::clone(&self.inner);
        self.inner
            .source
            .bind(Box::new(move |event| {
                inner.dispatcher.dispatch(event);
            }));
    }

    /// Register a subscription for future events.
    pub fn subscribe(&self, subscription: Subscription<E>) -> Result<(), SubscribeError> {
        self.inner.dispatcher.subscribe(subscription)
    }

    /// Remove the subscription with this id; unknown ids are ignored.
    pub fn unsubscribe(&self, id: &str) {
        self.inner.dispatcher.unsubscribe(id)
    }

    /// Dispatch an event directly, bypassing the source.
    ///
    /// Useful for platform glue that receives events out of band, and for
    /// driving the chain in tests.
    pub fn dispatch(&self, event: E) -> Chain<E> {
        self.inner.dispatcher.dispatch(event)
    }

    /// Platform name of the bound source.
    pub fn source_name(&self) -> &'static str {
        self.inner.source.name()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.inner.dispatcher.len()
    }

    /// Whether no subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.dispatcher.is_empty()
    }
}

impl<E: Payload> Clone for BackStack<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Payload> std::fmt::Debug for BackStack<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackStack")
            .field("source", &self.inner.source.name())
            .field("subscriptions", &self.len())
            .finish()
    }
}

/// Builder for a [`BackStack`] with subscriptions registered up front.
pub struct BackStackBuilder<E: Payload> {
    source: Box<dyn BackSource<E>>,
    initial: Vec<Subscription<E>>,
}

impl<E: Payload> BackStackBuilder<E> {
    /// Queue a subscription to register at build time.
    pub fn with_subscription(mut self, subscription: Subscription<E>) -> Self {
        self.initial.push(subscription);
        self
    }

    /// Build the handle, registering the queued subscriptions in order.
    ///
    /// Fails if two queued subscriptions share an id.
    pub fn build(self) -> Result<BackStack<E>, SubscribeError> {
        let dispatcher = BackDispatcher::new();
        for subscription in self.initial {
            dispatcher.subscribe(subscription)?;
        }
        Ok(BackStack {
            inner: Arc::new(Inner {
                dispatcher,
                source: self.source,
            }),
        })
    }
}

impl<E: Payload> std::fmt::Debug for BackStackBuilder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackStackBuilder")
            .field("initial", &self.initial.len())
            .finish_non_exhaustive()
    }
}
