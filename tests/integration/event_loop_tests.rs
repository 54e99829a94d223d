//! Event-loop scenarios against the mock adapters.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use avrpaneld::app::dispatch::Dispatcher;
use avrpaneld::app::service::{EventLoop, StopReason};

use crate::mock_link::{MockClock, MockLink, MockRunner, Step};

struct Harness {
    link: MockLink,
    clock: MockClock,
    runner: MockRunner,
    shutdown: Arc<AtomicBool>,
}

fn harness(steps: Vec<Step>, executable: Vec<&'static str>) -> Harness {
    let now = Rc::new(Cell::new(0));
    let shutdown = Arc::new(AtomicBool::new(false));
    Harness {
        link: MockLink::new(steps, Rc::clone(&now), Arc::clone(&shutdown)),
        clock: MockClock::new(now),
        runner: MockRunner::new(executable),
        shutdown,
    }
}

fn run(h: &mut Harness) -> StopReason {
    let mut event_loop = EventLoop::new(Dispatcher::new("/dev/ttyS1"));
    event_loop.run(&mut h.link, &mut h.runner, &h.clock, &h.shutdown)
}

#[test]
fn byte_flows_through_to_both_scripts() {
    let steps = vec![Step::Byte {
        at_ms: 42_500,
        code: 0x41,
    }];
    let mut h = harness(steps, vec!["allevent", "event-41"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert_eq!(h.runner.call_names(), ["allevent", "event-41"]);

    // Timestamp truncated to whole seconds, first occurrence delta 0.
    let (_, args) = &h.runner.calls[0];
    assert_eq!(args.as_slice(), ["/dev/ttyS1", "41", "42", "0"]);
}

#[test]
fn link_closed_on_shutdown() {
    let mut h = harness(vec![], vec![]);
    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert!(h.link.closed);
}

#[test]
fn pre_set_shutdown_stops_before_any_wait() {
    let steps = vec![Step::Byte {
        at_ms: 1_000,
        code: 0x41,
    }];
    let mut h = harness(steps, vec!["allevent"]);
    h.shutdown.store(true, Ordering::Release);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert!(h.link.closed);
    assert!(h.runner.calls.is_empty());
}

#[test]
fn fifty_wait_errors_are_fatal() {
    let steps = vec![Step::WaitError; 50];
    let mut h = harness(steps, vec![]);

    assert_eq!(run(&mut h), StopReason::RetriesExhausted);
    assert!(h.link.closed);
}

#[test]
fn fifty_read_errors_are_fatal() {
    let steps = vec![Step::ReadError; 50];
    let mut h = harness(steps, vec![]);

    assert_eq!(run(&mut h), StopReason::RetriesExhausted);
    assert!(h.link.closed);
}

#[test]
fn fewer_than_fifty_errors_is_not_fatal() {
    let steps = vec![Step::WaitError; 49];
    let mut h = harness(steps, vec![]);

    // Script exhaustion requests shutdown, so surviving the errors
    // shows up as a clean stop rather than retry exhaustion.
    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
}

#[test]
fn empty_read_resets_the_error_counter() {
    // 49 errors, one benign empty read, 49 more errors: never fatal.
    let mut steps = vec![Step::WaitError; 49];
    steps.push(Step::EmptyRead);
    steps.extend(vec![Step::WaitError; 49]);
    let mut h = harness(steps, vec!["allevent"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert!(h.runner.calls.is_empty(), "empty read must not dispatch");
}

#[test]
fn successful_byte_resets_the_error_counter() {
    let mut steps = vec![Step::WaitError; 49];
    steps.push(Step::Byte {
        at_ms: 5_000,
        code: 0x41,
    });
    steps.extend(vec![Step::WaitError; 49]);
    let mut h = harness(steps, vec!["allevent"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert_eq!(h.runner.call_names(), ["allevent"]);
}

#[test]
fn interrupted_wait_neither_counts_nor_dispatches() {
    let mut steps = vec![Step::Interrupted; 60];
    steps.push(Step::Byte {
        at_ms: 1_000,
        code: 0x41,
    });
    let mut h = harness(steps, vec!["allevent"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert_eq!(h.runner.call_names(), ["allevent"]);
}

#[test]
fn paired_code_burst_collapses_in_full_loop() {
    // 0x20 at t, +200 ms, +2500 ms: second suppressed, third dispatched.
    let steps = vec![
        Step::Byte {
            at_ms: 10_000,
            code: 0x20,
        },
        Step::Byte {
            at_ms: 10_200,
            code: 0x20,
        },
        Step::Byte {
            at_ms: 12_500,
            code: 0x20,
        },
    ];
    let mut h = harness(steps, vec!["event-20"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert_eq!(h.runner.call_names(), ["event-20", "event-20"]);
}

#[test]
fn unpaired_scenario_dispatches_three_events() {
    // 0x41 at t, +500 ms, +3000 ms → three events, deltas 0, 0, 2.
    let base = 100_000;
    let steps = vec![
        Step::Byte {
            at_ms: base,
            code: 0x41,
        },
        Step::Byte {
            at_ms: base + 500,
            code: 0x41,
        },
        Step::Byte {
            at_ms: base + 3000,
            code: 0x41,
        },
    ];
    let mut h = harness(steps, vec!["allevent"]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert_eq!(h.runner.calls.len(), 3);

    let deltas: Vec<&str> = h.runner.calls.iter().map(|(_, a)| a[3].as_str()).collect();
    assert_eq!(deltas, ["0", "0", "2"]);
}

#[test]
fn missing_scripts_do_not_affect_loop_health() {
    let steps = vec![
        Step::Byte {
            at_ms: 1_000,
            code: 0x55,
        },
        Step::Byte {
            at_ms: 4_000,
            code: 0x55,
        },
    ];
    let mut h = harness(steps, vec![]);

    assert_eq!(run(&mut h), StopReason::ShutdownRequested);
    assert!(h.runner.calls.is_empty());
}
