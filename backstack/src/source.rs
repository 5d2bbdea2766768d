//! External event source binding.
//!
//! The hardware signal arrives through a platform plugin outside this crate.
//! [`BackSource`] is the seam: a source accepts a handler and invokes it once
//! per back-button press with the payload the platform provides.

use backstack_core::Payload;

/// Handler a dispatcher registers with a source.
pub type EventHandler<E> = Box<dyn Fn(E) + Send + Sync>;

/// An external source of hardware back-navigation events.
///
/// Implementations wrap whatever the platform exposes (a JS bridge, an FFI
/// callback, a channel from the shell's event loop) and call the bound
/// handler once per delivered event.
pub trait BackSource<E: Payload>: Send + Sync {
    /// Platform name of this source, e.g. `"backButton"` on web-shell
    /// bridges.
    fn name(&self) -> &'static str;

    /// Register a handler for subsequent events.
    ///
    /// Each call adds another binding; guarding against repeated binds is the
    /// platform adapter's concern, not the dispatcher's.
    fn bind(&self, handler: EventHandler<E>);
}
