//! Application core — pure domain logic, zero I/O.
//!
//! The business rules for the GoFire controller: the fixed valve pulse
//! recipes and the single-guard operation sequencer.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod recipes;
pub mod service;
