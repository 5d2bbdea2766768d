//! # backstack - Continuation-Gated Back-Navigation Dispatch
//!
//! `backstack` gives a mobile application shell one ordered, interruptible
//! dispatch chain for the device back-button. Independent consumers (router,
//! modal layer, exit guard) subscribe with a priority; on each hardware
//! press, listeners run from highest to lowest priority, and each one must
//! explicitly call its continuation for the press to reach the next.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backstack::{BackEvent, BackStack, Subscription};
//!
//! // Constructed once at application start, cloned into consumers.
//! let stack = BackStack::new(platform_source);
//! stack.listen();
//!
//! // A modal that swallows the press while it is open:
//! stack.subscribe(Subscription::from_fn("modal", 20, move |_: &BackEvent, next| {
//!     if modal.is_open() { modal.close() } else { next.proceed() }
//! }))?;
//!
//! // The router below it only runs when the modal lets the press through:
//! stack.subscribe(Subscription::from_fn("nav", 10, move |event: &BackEvent, next| {
//!     if event.can_go_back { router.pop() } else { next.proceed() }
//! }))?;
//! ```
//!
//! ## Propagation model
//!
//! Dispatch walks a point-in-time snapshot of the registry, so a listener
//! that subscribes or unsubscribes mid-chain changes future events only.
//! A listener that never proceeds halts that event's chain permanently;
//! later events get a fresh snapshot and a fresh walk. Overlapping events
//! are not serialized: each press walks its own snapshot independently.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;
mod registry;
mod source;
mod stack;

pub mod listeners;
pub mod testing;

// Core re-exports
pub use backstack_core::{
    BackEvent, BackListener, Chain, ChainState, FnListener, Next, Payload, SubscribeError,
    Subscription, listener_fn,
};

pub use dispatcher::BackDispatcher;
pub use registry::SubscriptionRegistry;
pub use source::{BackSource, EventHandler};
pub use stack::{BackStack, BackStackBuilder};

/// Prelude module - common imports for backstack.
///
/// # Usage
///
/// ```rust,ignore
/// use backstack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BackEvent, BackListener, BackSource, BackStack, Chain, ChainState, Next, Payload,
        SubscribeError, Subscription, listener_fn,
    };
}
