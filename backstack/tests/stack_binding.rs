//! The application handle and its source binding.

use backstack::{
    BackEvent, BackStack, Subscription, listeners::LoggingListener,
    testing::{CountingListener, RecordingListener, SimulatedBackButton},
};

mod common;
use common::{event, order, recording};

#[test]
fn listen_binds_one_handler_per_call() {
    let source = SimulatedBackButton::<BackEvent>::new();
    let stack = BackStack::new(source.clone());

    assert_eq!(source.bindings(), 0);
    stack.listen();
    assert_eq!(source.bindings(), 1);
}

#[test]
fn pressed_events_flow_through_to_subscriptions() {
    let source = SimulatedBackButton::new();
    let stack = BackStack::new(source.clone());
    stack.listen();

    let recorder = RecordingListener::new();
    stack
        .subscribe(Subscription::new("recorder", 10, recorder.clone()))
        .unwrap();

    source.press(BackEvent::new(true));
    source.press(BackEvent::new(false));

    assert_eq!(
        recorder.events(),
        vec![BackEvent::new(true), BackEvent::new(false)]
    );
}

#[test]
fn events_subscribed_before_listen_are_still_delivered() {
    let source = SimulatedBackButton::new();
    let counter = CountingListener::new();
    let stack = BackStack::builder(source.clone())
        .with_subscription(Subscription::new("counter", 5, counter.clone()))
        .build()
        .unwrap();

    // No binding yet: presses go nowhere.
    source.press(BackEvent::default());
    assert_eq!(counter.count(), 0);

    stack.listen();
    source.press(BackEvent::default());
    assert_eq!(counter.count(), 1);
}

#[test]
fn builder_refuses_duplicate_initial_ids() {
    let result = BackStack::<BackEvent>::builder(SimulatedBackButton::new())
        .with_subscription(Subscription::new("dup", 1, CountingListener::new()))
        .with_subscription(Subscription::new("dup", 2, CountingListener::new()))
        .build();

    assert!(result.is_err());
}

#[test]
fn clones_share_one_registry() {
    let stack = BackStack::new(SimulatedBackButton::new());
    let seen = order();

    let consumer = stack.clone();
    consumer.subscribe(recording("shared", 1, &seen, true)).unwrap();

    stack.dispatch(event("press"));
    assert_eq!(*seen.lock().unwrap(), vec!["shared"]);

    stack.unsubscribe("shared");
    assert!(consumer.is_empty());
}

#[test]
fn logging_listener_passes_the_event_through() {
    let stack = BackStack::new(SimulatedBackButton::new());
    let downstream = CountingListener::new();

    stack
        .subscribe(Subscription::new("log", 100, LoggingListener))
        .unwrap();
    stack
        .subscribe(Subscription::new("after", 1, downstream.clone()))
        .unwrap();

    stack.dispatch(BackEvent::new(true));
    assert_eq!(downstream.count(), 1);
}

#[test]
fn source_name_reports_the_platform_binding() {
    let stack = BackStack::<BackEvent>::new(SimulatedBackButton::new());
    assert_eq!(stack.source_name(), "backButton");
}
