//! Payload trait for event data.

/// A marker trait for the data a hardware event carries through a chain.
///
/// Payloads must be `Send + Sync + 'static` so a chain can hand them to
/// listeners that resume from another task.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct ShellEvent { route: String }
///
/// impl Payload for ShellEvent {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Payload",
    label = "must be `Send + Sync + 'static`",
    note = "Event data handed to a chain must be thread-safe and static."
)]
pub trait Payload: Send + Sync + 'static {}

// Common Payload implementations
impl Payload for () {}
impl Payload for String {}
impl Payload for &'static str {}
impl<T: Payload> Payload for Box<T> {}
impl<T: Payload> Payload for std::sync::Arc<T> {}
impl<T: Payload> Payload for Vec<T> {}
impl<T: Payload> Payload for Option<T> {}

/// The payload delivered by a device back-button press.
///
/// Mirrors what mobile shells report alongside the hardware signal: whether
/// the embedded web view still has history of its own to pop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackEvent {
    /// `true` when the shell can still navigate back within its own history.
    pub can_go_back: bool,
}

impl BackEvent {
    /// Create a payload with the given history flag.
    pub fn new(can_go_back: bool) -> Self {
        Self { can_go_back }
    }
}

impl Payload for BackEvent {}
