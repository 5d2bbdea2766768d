//! Ready-made listeners.

use backstack_core::{BackListener, Next, Payload};

/// A listener that logs each event it sees and always proceeds.
///
/// Register it at a high priority to observe every back-button press without
/// affecting propagation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl<E: Payload + std::fmt::Debug> BackListener<E> for LoggingListener {
    fn on_back(&self, event: &E, next: Next<E>) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(?event, "back event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event; // Suppress unused warning
        }
        next.proceed();
    }
}
