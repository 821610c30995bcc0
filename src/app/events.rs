//! Outbound application events.
//!
//! The [`Sequencer`](super::service::Sequencer) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — today that is the serial log.

use crate::error::ActuatorError;

use super::recipes::{Channel, Operation};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// An operation acquired the guard and is executing its recipe.
    OperationStarted(Operation),

    /// An operation ran its full recipe.  `fault_count` is non-zero when
    /// one or more relay writes failed along the way.
    OperationCompleted {
        operation: Operation,
        fault_count: usize,
    },

    /// An operation was rejected because another one holds the guard.
    OperationRejected(Operation),

    /// A single relay write failed mid-recipe.  The sequence continues.
    LineFault {
        operation: Operation,
        channel: Channel,
        error: ActuatorError,
    },
}
