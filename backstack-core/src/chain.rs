//! Continuation-gated chain walk.
//!
//! One [`Chain`] is created per dispatched event. It owns the payload and a
//! point-in-time snapshot of the subscriptions, and walks the snapshot from
//! front to back. The walk advances past a listener only when that listener
//! calls [`Next::proceed`] on the handle it was given.
//!
//! The walk is driven by an explicit state machine rather than by nested
//! callback frames: a listener that proceeds synchronously queues the advance
//! for the driving loop instead of recursing, so stack depth stays constant
//! no matter how long the snapshot is. A listener may also move its `Next`
//! handle into another task and proceed later; the walk then continues on
//! whichever thread called `proceed`.

use crate::event::Payload;
use crate::listener::Subscription;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where a chain walk currently stands.
///
/// `Running(i)` means the listener at snapshot index `i` has been invoked and
/// the walk is waiting on its continuation. `Halted(i)` means that listener
/// can no longer proceed: every handle it was given has been dropped unfired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// The walk has not invoked any listener yet.
    NotStarted,
    /// Waiting on the continuation of the listener at this snapshot index.
    Running(usize),
    /// The listener at this index dropped its continuation without proceeding.
    Halted(usize),
    /// Every listener in the snapshot proceeded (or the snapshot was empty).
    Completed,
}

struct Walk {
    state: ChainState,
    // True while a drive loop on some thread is between invocations.
    driving: bool,
    // A synchronous proceed observed while driving; consumed by the loop.
    queued: Option<usize>,
}

struct ChainCore<E: Payload> {
    event: E,
    entries: Vec<Arc<Subscription<E>>>,
    walk: Mutex<Walk>,
}

impl<E: Payload> ChainCore<E> {
    fn lock(&self) -> MutexGuard<'_, Walk> {
        // State updates under the lock cannot panic; a poisoned lock can only
        // come from a listener unwinding, and the state is still coherent.
        self.walk.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(self: &Arc<Self>) {
        let mut walk = self.lock();
        if walk.state != ChainState::NotStarted {
            return;
        }
        if self.entries.is_empty() {
            walk.state = ChainState::Completed;
            return;
        }
        self.drive(0, walk);
    }

    /// Invoke listeners from `first` onward while they proceed synchronously.
    ///
    /// The lock is released around each invocation; a proceed arriving during
    /// the invocation lands in `queued` and is consumed here, which is what
    /// keeps synchronous chains from nesting one stack frame per listener.
    fn drive<'a>(self: &'a Arc<Self>, first: usize, mut walk: MutexGuard<'a, Walk>) {
        walk.driving = true;
        let mut index = first;
        loop {
            walk.state = ChainState::Running(index);
            drop(walk);
            self.invoke(index);
            walk = self.lock();
            match walk.queued.take() {
                Some(from) if from == index && walk.state == ChainState::Running(index) => {
                    if index + 1 == self.entries.len() {
                        walk.state = ChainState::Completed;
                        break;
                    }
                    index += 1;
                }
                // No synchronous proceed: the listener halted, or kept its
                // handle for a later resume.
                _ => break,
            }
        }
        walk.driving = false;
    }

    fn invoke(self: &Arc<Self>, index: usize) {
        let next = Next {
            inner: Arc::new(NextInner {
                chain: Arc::clone(self),
                index,
                fired: AtomicBool::new(false),
            }),
        };
        self.entries[index].listener().on_back(&self.event, next);
    }

    /// A listener at `from` proceeded. Advance, unless the walk already moved.
    fn resume(self: &Arc<Self>, from: usize) {
        let mut walk = self.lock();
        if walk.state != ChainState::Running(from) {
            return;
        }
        if walk.driving {
            walk.queued = Some(from);
            return;
        }
        if from + 1 == self.entries.len() {
            walk.state = ChainState::Completed;
            return;
        }
        self.drive(from + 1, walk);
    }

    /// The listener at `at` can no longer proceed; park the walk there.
    fn halt(&self, at: usize) {
        let mut walk = self.lock();
        if walk.state == ChainState::Running(at) {
            walk.state = ChainState::Halted(at);
        }
    }
}

struct NextInner<E: Payload> {
    chain: Arc<ChainCore<E>>,
    index: usize,
    fired: AtomicBool,
}

impl<E: Payload> Drop for NextInner<E> {
    fn drop(&mut self) {
        if !*self.fired.get_mut() {
            self.chain.halt(self.index);
        }
    }
}

/// The continuation handed to each listener invocation.
///
/// Calling [`proceed`](Next::proceed) resumes the chain past the listener
/// this handle was issued to. The handle is bound to that position: once the
/// walk has moved on, further calls are no-ops, so proceeding twice (or from
/// a stale clone) never re-runs downstream listeners.
///
/// `Next` is `Clone + Send + 'static`; clones share one firing, and a
/// listener may move the handle into a spawned task to proceed later. If
/// every clone is dropped without proceeding, the chain is halted at this
/// listener's position.
pub struct Next<E: Payload> {
    inner: Arc<NextInner<E>>,
}

impl<E: Payload> Next<E> {
    /// Resume the chain with the next listener in the snapshot.
    ///
    /// The first call from this invocation advances the walk; every further
    /// call, including at the end of the snapshot, does nothing.
    pub fn proceed(&self) {
        if self.inner.fired.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.chain.resume(self.inner.index);
    }
}

impl<E: Payload> Clone for Next<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Payload> std::fmt::Debug for Next<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("index", &self.inner.index)
            .field("fired", &self.inner.fired.load(Ordering::Acquire))
            .finish()
    }
}

/// Handle to one event's walk over one snapshot.
///
/// Returned by the dispatcher when an event arrives. Dropping the handle does
/// not stop the walk; listeners holding a [`Next`] can still resume it.
pub struct Chain<E: Payload> {
    core: Arc<ChainCore<E>>,
}

impl<E: Payload> Chain<E> {
    /// Start a walk over `entries` for `event`.
    ///
    /// Listeners that proceed synchronously run before this returns. An empty
    /// snapshot completes immediately.
    pub fn begin(event: E, entries: Vec<Arc<Subscription<E>>>) -> Self {
        let core = Arc::new(ChainCore {
            event,
            entries,
            walk: Mutex::new(Walk {
                state: ChainState::NotStarted,
                driving: false,
                queued: None,
            }),
        });
        core.start();
        Self { core }
    }

    /// The walk's current position.
    pub fn state(&self) -> ChainState {
        self.core.lock().state
    }

    /// The payload this chain carries.
    pub fn event(&self) -> &E {
        &self.core.event
    }

    /// Number of subscriptions in this chain's snapshot.
    pub fn len(&self) -> usize {
        self.core.entries.len()
    }

    /// Whether the snapshot was empty.
    pub fn is_empty(&self) -> bool {
        self.core.entries.is_empty()
    }
}

impl<E: Payload> Clone for Chain<E> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<E: Payload> std::fmt::Debug for Chain<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("state", &self.state())
            .field("len", &self.len())
            .finish()
    }
}
