//! Testing utilities.
//!
//! Helpers for exercising chains without a real platform source:
//!
//! - [`RecordingListener`]: records every payload it receives
//! - [`CountingListener`]: counts invocations
//! - [`HoldingListener`]: parks its continuation for a manual release
//! - [`SimulatedBackButton`]: an in-memory [`BackSource`] with a `press`
//!   method

use crate::source::{BackSource, EventHandler};
use backstack_core::{BackListener, Next, Payload};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all payloads it receives.
///
/// Proceeds by default; use [`holding`](RecordingListener::holding) for a
/// recorder that stops propagation instead.
pub struct RecordingListener<E: Clone> {
    events: Arc<Mutex<Vec<E>>>,
    proceeds: bool,
}

impl<E: Clone> RecordingListener<E> {
    /// A recorder that calls `proceed` after recording.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            proceeds: true,
        }
    }

    /// A recorder that never proceeds, stopping the chain at its position.
    pub fn holding() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            proceeds: false,
        }
    }

    /// Clone of the recorded payloads.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Number of recorded payloads.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Clone> Default for RecordingListener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for RecordingListener<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            proceeds: self.proceeds,
        }
    }
}

impl<E: Payload + Clone> BackListener<E> for RecordingListener<E> {
    fn on_back(&self, event: &E, next: Next<E>) {
        self.events.lock().unwrap().push(event.clone());
        if self.proceeds {
            next.proceed();
        }
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
pub struct CountingListener {
    count: Arc<AtomicUsize>,
    proceeds: bool,
}

impl CountingListener {
    /// A counter that proceeds after counting.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            proceeds: true,
        }
    }

    /// A counter that never proceeds.
    pub fn holding() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            proceeds: false,
        }
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingListener {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            proceeds: self.proceeds,
        }
    }
}

impl<E: Payload> BackListener<E> for CountingListener {
    fn on_back(&self, _event: &E, next: Next<E>) {
        self.count.fetch_add(1, Ordering::SeqCst);
        if self.proceeds {
            next.proceed();
        }
    }
}

// ============================================================================
// Holding Listener
// ============================================================================

/// A listener that parks its continuation for a manual, later release.
///
/// Each invocation replaces the parked handle; [`release`] proceeds the
/// latest one, [`drop_pending`] discards it without proceeding (which halts
/// the chain it belonged to).
///
/// [`release`]: HoldingListener::release
/// [`drop_pending`]: HoldingListener::drop_pending
pub struct HoldingListener<E: Payload> {
    pending: Arc<Mutex<Option<Next<E>>>>,
}

impl<E: Payload> HoldingListener<E> {
    /// Create a listener with no parked continuation.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Proceed the parked continuation, if any. Returns whether one existed.
    pub fn release(&self) -> bool {
        match self.pending.lock().unwrap().take() {
            Some(next) => {
                next.proceed();
                true
            }
            None => false,
        }
    }

    /// Discard the parked continuation without proceeding.
    pub fn drop_pending(&self) {
        self.pending.lock().unwrap().take();
    }

    /// Whether a continuation is currently parked.
    pub fn is_holding(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }
}

impl<E: Payload> Default for HoldingListener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Payload> Clone for HoldingListener<E> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<E: Payload> BackListener<E> for HoldingListener<E> {
    fn on_back(&self, _event: &E, next: Next<E>) {
        *self.pending.lock().unwrap() = Some(next);
    }
}

// ============================================================================
// Simulated Source
// ============================================================================

/// An in-memory [`BackSource`] for tests and demos.
///
/// Handlers bound via [`BackSource::bind`] are invoked in binding order each
/// time [`press`](SimulatedBackButton::press) is called.
pub struct SimulatedBackButton<E: Payload> {
    handlers: Arc<Mutex<Vec<EventHandler<E>>>>,
}

impl<E: Payload> SimulatedBackButton<E> {
    /// Create a source with no bound handlers.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deliver one simulated hardware press to every bound handler.
    pub fn press(&self, event: E)
    where
        E: Clone,
    {
        let handlers = self.handlers.lock().unwrap();
        for handler in handlers.iter() {
            handler(event.clone());
        }
    }

    /// Number of handlers bound so far.
    pub fn bindings(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}

impl<E: Payload> Default for SimulatedBackButton<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Payload> Clone for SimulatedBackButton<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E: Payload> BackSource<E> for SimulatedBackButton<E> {
    fn name(&self) -> &'static str {
        "backButton"
    }

    fn bind(&self, handler: EventHandler<E>) {
        self.handlers.lock().unwrap().push(handler);
    }
}
