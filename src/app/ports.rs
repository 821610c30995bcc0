//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Sequencer (domain)
//! ```
//!
//! Driven adapters (the relay board, the system clock, event sinks)
//! implement these traits.  The [`Sequencer`](super::service::Sequencer)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use core::time::Duration;

use crate::error::ActuatorError;

use super::events::AppEvent;
use super::recipes::{Channel, Contact};

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command one relay contact.
///
/// A failed write is surfaced, never swallowed — the sequencer records the
/// fault and keeps the pulse sequence's timing intact.
pub trait RelayPort {
    fn set_contact(&mut self, channel: Channel, contact: Contact)
    -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → real time)
// ───────────────────────────────────────────────────────────────

/// Blocking suspension between recipe steps.
///
/// The hold happens while the operation guard is held; stalling the calling
/// thread for the full duration is a physical-timing requirement of the
/// valve electronics, not an implementation shortcut.  Tests substitute a
/// recording or scaled clock.
pub trait ClockPort {
    fn hold(&self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log today; anything else tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
