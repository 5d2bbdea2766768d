use backstack::{Next, Payload, Subscription};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Event Type
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TestEvent {
    pub label: String,
}

impl Payload for TestEvent {}

pub fn event(label: &str) -> TestEvent {
    TestEvent {
        label: label.to_string(),
    }
}

// ============================================================================
// Order-Recording Subscriptions
// ============================================================================

pub type Order = Arc<Mutex<Vec<&'static str>>>;

pub fn order() -> Order {
    Arc::new(Mutex::new(Vec::new()))
}

/// A subscription that records its id on invocation and optionally proceeds.
pub fn recording(
    id: &'static str,
    priority: i32,
    order: &Order,
    proceeds: bool,
) -> Subscription<TestEvent> {
    let order = Arc::clone(order);
    Subscription::from_fn(id, priority, move |_event: &TestEvent, next: Next<TestEvent>| {
        order.lock().unwrap().push(id);
        if proceeds {
            next.proceed();
        }
    })
}
