//! Subscribe/unsubscribe behavior, including mutation from inside a chain.

use backstack::{
    BackStack, ChainState, SubscribeError, Subscription, testing::SimulatedBackButton,
};

mod common;
use common::{TestEvent, event, order, recording};

fn stack() -> BackStack<TestEvent> {
    BackStack::new(SimulatedBackButton::new())
}

#[test]
fn duplicate_id_is_refused() {
    let stack = stack();
    stack.subscribe(recording("nav", 10, &order(), true)).unwrap();

    let err = stack
        .subscribe(recording("nav", 99, &order(), true))
        .unwrap_err();

    assert_eq!(err, SubscribeError::DuplicateId("nav".to_string()));
    assert_eq!(stack.len(), 1);
}

#[test]
fn unsubscribing_unknown_id_does_not_panic() {
    let stack = stack();
    stack.subscribe(recording("present", 1, &order(), true)).unwrap();

    stack.unsubscribe("absent");

    assert_eq!(stack.len(), 1);
}

#[test]
fn unsubscribe_mid_chain_spares_the_current_snapshot() {
    let stack = stack();
    let seen = order();

    // "first" removes "second" from inside its own invocation, then proceeds.
    let seen_first = std::sync::Arc::clone(&seen);
    let stack_inside = stack.clone();
    stack
        .subscribe(Subscription::from_fn("first", 2, move |_event, next| {
            seen_first.lock().unwrap().push("first");
            stack_inside.unsubscribe("second");
            next.proceed();
        }))
        .unwrap();
    stack.subscribe(recording("second", 1, &seen, true)).unwrap();

    let chain = stack.dispatch(event("one"));

    // The in-progress walk still reaches "second"; the removal only shapes
    // the next event.
    assert_eq!(chain.state(), ChainState::Completed);
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);

    stack.dispatch(event("two"));
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "first"]);
}

#[test]
fn subscribe_mid_chain_only_affects_future_events() {
    let stack = stack();
    let seen = order();

    let seen_inside = std::sync::Arc::clone(&seen);
    let stack_inside = stack.clone();
    let seen_late = std::sync::Arc::clone(&seen);
    stack
        .subscribe(Subscription::from_fn("greeter", 10, move |_event, next| {
            seen_inside.lock().unwrap().push("greeter");
            // Register a lower-priority listener while this chain runs.
            let seen_late = std::sync::Arc::clone(&seen_late);
            let _ = stack_inside.subscribe(Subscription::from_fn(
                "latecomer",
                1,
                move |_event: &TestEvent, next| {
                    seen_late.lock().unwrap().push("latecomer");
                    next.proceed();
                },
            ));
            next.proceed();
        }))
        .unwrap();

    stack.dispatch(event("one"));
    assert_eq!(*seen.lock().unwrap(), vec!["greeter"]);

    stack.dispatch(event("two"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["greeter", "greeter", "latecomer"]
    );
}

#[test]
fn resubscribing_a_removed_id_is_allowed() {
    let stack = stack();
    stack.subscribe(recording("nav", 10, &order(), true)).unwrap();
    stack.unsubscribe("nav");
    stack.subscribe(recording("nav", 20, &order(), true)).unwrap();
    assert_eq!(stack.len(), 1);
}
