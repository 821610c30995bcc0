//! Operation sequencer — the hexagonal core.
//!
//! [`Sequencer`] owns the single-permit guard and the relay board behind
//! it.  It exposes one entry point, [`try_run`](Sequencer::try_run), with a
//! strict non-blocking contract:
//!
//! ```text
//!  HTTP route ──▶ ┌──────────────────┐ ──▶ EventSink
//!                 │    Sequencer      │
//!   RelayPort ◀── │  guard · recipes  │
//!                 └──────────────────┘
//! ```
//!
//! Two physical pulse sequences must never interleave — the GV60 interprets
//! contact timing, so an overlap would send it a garbage command.  The board
//! therefore lives *inside* the mutex: holding the permit is the only way to
//! reach the relay outputs, and the permit is released on every exit path by
//! RAII scope.

use std::sync::{Mutex, TryLockError};

use log::{debug, warn};

use crate::error::ActuatorError;

use super::events::AppEvent;
use super::ports::{ClockPort, EventSink, RelayPort};
use super::recipes::{Channel, Operation};

// ───────────────────────────────────────────────────────────────
// Outcomes
// ───────────────────────────────────────────────────────────────

/// Upper bound on faults per run: one per contact assignment, and the
/// largest recipe (off) carries six assignments.
pub const MAX_FAULTS: usize = 8;

/// One failed relay write, recorded mid-recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFault {
    pub channel: Channel,
    pub error: ActuatorError,
}

/// Result of a completed run.  The recipe always executes to the end of its
/// timing sequence; `faults` lists any relay writes that failed on the way.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub operation: Operation,
    pub faults: heapless::Vec<LineFault, MAX_FAULTS>,
}

impl Outcome {
    /// True when every relay write succeeded.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    /// The wire token for this outcome (`*_ok` or `*_fault`).
    pub fn token(&self) -> &'static str {
        if self.is_clean() {
            self.operation.ok_token()
        } else {
            self.operation.fault_token()
        }
    }
}

/// Rejection: another operation holds the guard.  First-attempt-wins; the
/// caller must not queue or retry-wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

// ───────────────────────────────────────────────────────────────
// Sequencer
// ───────────────────────────────────────────────────────────────

/// Serialises valve operations over a relay board.
pub struct Sequencer<B, C> {
    board: Mutex<B>,
    clock: C,
}

impl<B: RelayPort, C: ClockPort> Sequencer<B, C> {
    pub fn new(board: B, clock: C) -> Self {
        Self {
            board: Mutex::new(board),
            clock,
        }
    }

    /// Attempt to run `operation`'s recipe now.
    ///
    /// Returns [`Busy`] immediately, with zero side effects, when another
    /// recipe is in flight.  Otherwise executes every step in order —
    /// apply the step's contact assignments, then hold for its duration —
    /// and returns the [`Outcome`] once the sequence completes.
    ///
    /// A relay write failure is logged, recorded in the outcome, and does
    /// not abort the run: the valve expects the full timed sequence, and
    /// cutting it short could leave contacts closed.
    pub fn try_run(
        &self,
        operation: Operation,
        sink: &mut impl EventSink,
    ) -> Result<Outcome, Busy> {
        let mut board = match self.board.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                debug!("{}: guard held, rejecting", operation.name());
                sink.emit(&AppEvent::OperationRejected(operation));
                return Err(Busy);
            }
            // A panic in a previous run poisons the mutex but the permit
            // itself was released; recover the guard instead of bricking
            // the controller until reboot.
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        sink.emit(&AppEvent::OperationStarted(operation));
        let mut faults: heapless::Vec<LineFault, MAX_FAULTS> = heapless::Vec::new();

        for step in operation.recipe().steps {
            for &(channel, contact) in step.assignments {
                if let Err(error) = board.set_contact(channel, contact) {
                    warn!("{}: {:?} write failed: {}", operation.name(), channel, error);
                    sink.emit(&AppEvent::LineFault {
                        operation,
                        channel,
                        error,
                    });
                    let _ = faults.push(LineFault { channel, error });
                }
            }
            if !step.hold.is_zero() {
                self.clock.hold(step.hold);
            }
        }

        sink.emit(&AppEvent::OperationCompleted {
            operation,
            fault_count: faults.len(),
        });

        // `board` drops here, releasing the guard.
        Ok(Outcome { operation, faults })
    }

    /// Tear down the sequencer and hand back the board (test inspection).
    pub fn into_board(self) -> B {
        self.board
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
