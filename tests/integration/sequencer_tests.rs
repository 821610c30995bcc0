//! Integration tests for the sequencer → relay board pipeline.
//!
//! These verify the full chain from an operation request down to the
//! ordered contact writes and holds, plus the single-guard concurrency
//! contract: serialised execution, immediate busy rejection, and guard
//! release on every exit path.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use gofire::app::events::AppEvent;
use gofire::app::ports::RelayPort;
use gofire::app::recipes::{Channel, Contact, OPERATIONS, Operation};
use gofire::app::service::{Busy, Sequencer};
use gofire::error::ActuatorError;

use crate::mock_hw::{MockBoard, RecordingSink, Trace, TraceClock, TraceEvent, new_trace, snapshot};

// ── Helpers ───────────────────────────────────────────────────

/// The trace an uncontended, fault-free run of `op` must produce.
fn expected_trace(op: Operation) -> Vec<TraceEvent> {
    let mut v = Vec::new();
    for step in op.recipe().steps {
        for &(ch, c) in step.assignments {
            v.push(TraceEvent::Set(ch, c));
        }
        if !step.hold.is_zero() {
            v.push(TraceEvent::Hold(step.hold));
        }
    }
    v
}

fn instant_sequencer(trace: &Trace) -> Sequencer<MockBoard, TraceClock> {
    Sequencer::new(
        MockBoard::new(Arc::clone(trace)),
        TraceClock::instant(Arc::clone(trace)),
    )
}

fn wait_until(what: &str, mut pred: impl FnMut() -> bool) {
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(2) {
        if pred() {
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
    panic!("timed out waiting for: {what}");
}

// ── Recipe fidelity ───────────────────────────────────────────

#[test]
fn on_runs_exact_pulse_sequence() {
    let trace = new_trace();
    let seq = instant_sequencer(&trace);
    let mut sink = RecordingSink::new();

    let outcome = seq.try_run(Operation::On, &mut sink).unwrap();

    assert_eq!(outcome.token(), "on_ok");
    assert!(outcome.is_clean());
    assert_eq!(
        snapshot(&trace),
        vec![
            TraceEvent::Set(Channel::Ch1, Contact::Closed),
            TraceEvent::Set(Channel::Ch2, Contact::Open),
            TraceEvent::Set(Channel::Ch3, Contact::Closed),
            TraceEvent::Hold(Duration::from_secs(1)),
            TraceEvent::Set(Channel::Ch1, Contact::Open),
            TraceEvent::Set(Channel::Ch3, Contact::Open),
        ]
    );
    assert_eq!(
        sink.events,
        vec![
            AppEvent::OperationStarted(Operation::On),
            AppEvent::OperationCompleted {
                operation: Operation::On,
                fault_count: 0
            },
        ]
    );
}

#[test]
fn off_runs_exact_pulse_sequence() {
    let trace = new_trace();
    let seq = instant_sequencer(&trace);

    let outcome = seq.try_run(Operation::Off, &mut RecordingSink::new()).unwrap();

    assert_eq!(outcome.token(), "off_ok");
    assert_eq!(
        snapshot(&trace),
        vec![
            TraceEvent::Set(Channel::Ch1, Contact::Closed),
            TraceEvent::Set(Channel::Ch2, Contact::Closed),
            TraceEvent::Set(Channel::Ch3, Contact::Closed),
            TraceEvent::Hold(Duration::from_secs(1)),
            TraceEvent::Set(Channel::Ch1, Contact::Open),
            TraceEvent::Set(Channel::Ch2, Contact::Open),
            TraceEvent::Set(Channel::Ch3, Contact::Open),
        ]
    );
}

#[test]
fn every_operation_matches_its_recipe_uncontended() {
    for op in OPERATIONS {
        let trace = new_trace();
        let seq = instant_sequencer(&trace);
        let outcome = seq.try_run(op, &mut RecordingSink::new()).unwrap();
        assert_eq!(outcome.token(), op.ok_token());
        assert_eq!(snapshot(&trace), expected_trace(op), "{:?}", op);
        // No recipe leaves a contact closed behind.
        assert!(seq.into_board().all_open(), "{:?}", op);
    }
}

// ── Busy correctness ──────────────────────────────────────────

#[test]
fn second_caller_rejected_immediately_with_zero_side_effects() {
    let trace = new_trace();
    let seq = Arc::new(Sequencer::new(
        MockBoard::new(Arc::clone(&trace)),
        TraceClock::paced(Arc::clone(&trace), Duration::from_millis(150)),
    ));

    let winner = {
        let seq = Arc::clone(&seq);
        thread::spawn(move || seq.try_run(Operation::On, &mut RecordingSink::new()))
    };

    // Wait until the winner is inside its recipe (guard held).
    wait_until("winner started writing contacts", || {
        !trace.lock().unwrap().is_empty()
    });

    let mut sink = RecordingSink::new();
    let started = Instant::now();
    let result = seq.try_run(Operation::Off, &mut sink);
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(Busy)));
    // Rejection must not wait out the winner's 150 ms hold.
    assert!(elapsed < Duration::from_millis(100), "took {:?}", elapsed);
    assert_eq!(sink.events, vec![AppEvent::OperationRejected(Operation::Off)]);

    winner.join().unwrap().unwrap();
    // The loser left no mark: the trace is exactly the winner's recipe.
    assert_eq!(snapshot(&trace), expected_trace(Operation::On));
}

// ── Mutual exclusion ──────────────────────────────────────────

#[test]
fn racing_callers_never_interleave_recipes() {
    let trace = new_trace();
    let seq = Arc::new(Sequencer::new(
        MockBoard::new(Arc::clone(&trace)),
        TraceClock::paced(Arc::clone(&trace), Duration::from_millis(40)),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let seq = Arc::clone(&seq);
            thread::spawn(move || seq.try_run(Operation::FlameDown, &mut RecordingSink::new()))
        })
        .collect();

    let mut successes = 0;
    let mut busies = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(outcome) => {
                assert_eq!(outcome.token(), "flamedown_ok");
                successes += 1;
            }
            Err(Busy) => busies += 1,
        }
    }

    assert_eq!(successes + busies, 8);
    assert!(successes >= 1);

    // Every successful run appended one complete, uninterrupted recipe.
    let pattern = expected_trace(Operation::FlameDown);
    let trace = snapshot(&trace);
    assert_eq!(trace.len(), successes * pattern.len());
    for chunk in trace.chunks(pattern.len()) {
        assert_eq!(chunk, &pattern[..]);
    }
}

// ── Release on exit ───────────────────────────────────────────

#[test]
fn guard_is_reusable_after_each_run() {
    let trace = new_trace();
    let seq = instant_sequencer(&trace);
    let mut sink = RecordingSink::new();

    assert!(seq.try_run(Operation::On, &mut sink).is_ok());
    assert!(seq.try_run(Operation::FlameUp, &mut sink).is_ok());
    assert!(seq.try_run(Operation::Off, &mut sink).is_ok());
}

#[test]
fn guard_recovered_after_mid_recipe_panic() {
    /// Panics on the first write, then behaves.
    struct PanicOnceBoard {
        armed: bool,
    }
    impl RelayPort for PanicOnceBoard {
        fn set_contact(&mut self, _: Channel, _: Contact) -> Result<(), ActuatorError> {
            if self.armed {
                self.armed = false;
                panic!("injected relay panic");
            }
            Ok(())
        }
    }

    let trace = new_trace();
    let seq = Sequencer::new(
        PanicOnceBoard { armed: true },
        TraceClock::instant(trace),
    );

    let panicked = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = seq.try_run(Operation::On, &mut RecordingSink::new());
    }));
    assert!(panicked.is_err());

    // The poisoned guard must still be acquirable.
    let outcome = seq.try_run(Operation::Off, &mut RecordingSink::new());
    assert!(outcome.is_ok());
}

// ── Idempotent restart ────────────────────────────────────────

#[test]
fn same_operation_twice_sequentially_succeeds_twice() {
    let trace = new_trace();
    let seq = instant_sequencer(&trace);

    let first = seq.try_run(Operation::FlameUp, &mut RecordingSink::new()).unwrap();
    let second = seq.try_run(Operation::FlameUp, &mut RecordingSink::new()).unwrap();

    assert_eq!(first.token(), second.token());
    assert_eq!(first.faults.len(), second.faults.len());

    let pattern = expected_trace(Operation::FlameUp);
    let trace = snapshot(&trace);
    assert_eq!(trace.len(), 2 * pattern.len());
    assert_eq!(&trace[..pattern.len()], &pattern[..]);
    assert_eq!(&trace[pattern.len()..], &pattern[..]);
}

// ── Fault aggregation ─────────────────────────────────────────

#[test]
fn failed_writes_are_recorded_and_sequence_continues() {
    let trace = new_trace();
    let seq = Sequencer::new(
        MockBoard::failing(Arc::clone(&trace), vec![Channel::Ch1]),
        TraceClock::instant(Arc::clone(&trace)),
    );
    let mut sink = RecordingSink::new();

    let outcome = seq.try_run(Operation::Off, &mut sink).unwrap();

    // Ch1 appears twice in the off recipe; both writes failed.
    assert_eq!(outcome.faults.len(), 2);
    assert!(outcome.faults.iter().all(|f| f.channel == Channel::Ch1));
    assert!(!outcome.is_clean());
    assert_eq!(outcome.token(), "off_fault");

    // The rest of the sequence ran with its timing intact.
    assert_eq!(
        snapshot(&trace),
        vec![
            TraceEvent::Set(Channel::Ch2, Contact::Closed),
            TraceEvent::Set(Channel::Ch3, Contact::Closed),
            TraceEvent::Hold(Duration::from_secs(1)),
            TraceEvent::Set(Channel::Ch2, Contact::Open),
            TraceEvent::Set(Channel::Ch3, Contact::Open),
        ]
    );

    let fault_events = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::LineFault { .. }))
        .count();
    assert_eq!(fault_events, 2);
    assert!(sink.events.contains(&AppEvent::OperationCompleted {
        operation: Operation::Off,
        fault_count: 2
    }));
}
