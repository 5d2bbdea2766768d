//! Error types.
//!
//! Chain dispatch itself is infallible; the only operation that can be
//! refused is registering a subscription under an id that is already taken.

use thiserror::Error;

/// Errors raised when registering a subscription.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// A subscription with this id is already registered.
    ///
    /// Ids are the identity key for removal; two live subscriptions sharing
    /// one id could not be unsubscribed independently.
    #[error("listener id already registered: {0}")]
    DuplicateId(String),
}
