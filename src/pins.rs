//! GPIO pin assignments for the GoFire relay board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! The three relay channels are wired to the corresponding contact numbers
//! on the Mertik Maxitrol GV60 terminal block (see the GV60 external-source
//! wall-switch wiring diagram).  Relay inputs are active-low: driving the
//! GPIO to logic 0 energises the relay and closes the contact.

/// Relay channel 1 → GV60 contact 1.
pub const RELAY_CH1_GPIO: i32 = 25;
/// Relay channel 2 → GV60 contact 2.
pub const RELAY_CH2_GPIO: i32 = 26;
/// Relay channel 3 → GV60 contact 3.
pub const RELAY_CH3_GPIO: i32 = 27;
