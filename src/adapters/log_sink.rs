//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::OperationStarted(op) => {
                info!("RUN   | {}", op.name());
            }
            AppEvent::OperationCompleted {
                operation,
                fault_count: 0,
            } => {
                info!("DONE  | {}", operation.name());
            }
            AppEvent::OperationCompleted {
                operation,
                fault_count,
            } => {
                warn!("DONE  | {} with {} relay fault(s)", operation.name(), fault_count);
            }
            // Busy is a first-class outcome, not an error.
            AppEvent::OperationRejected(op) => {
                debug!("BUSY  | {}", op.name());
            }
            AppEvent::LineFault {
                operation,
                channel,
                error,
            } => {
                warn!("FAULT | {} {:?}: {}", operation.name(), channel, error);
            }
        }
    }
}
