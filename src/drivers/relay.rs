//! Single relay channel driver.
//!
//! Each channel is one digital output on the relay board, wired to one
//! GV60 contact.  The driver is a dumb actuator: it sets the level it is
//! told and remembers the last commanded state.  Sequencing and mutual
//! exclusion live above it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

pub struct RelayChannel {
    pin: i32,
    level: u8,
}

impl RelayChannel {
    /// Bind a channel to its GPIO.  Outputs rest at logic 1 (open), which
    /// is the level hw_init drove them to.
    pub fn new(pin: i32) -> Self {
        Self { pin, level: 1 }
    }

    /// Drive the output to `level` (0 = contact closed, 1 = open).
    pub fn set_level(&mut self, level: u8) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.pin, level != 0).map_err(ActuatorError::GpioWriteFailed)?;
        self.level = level;
        Ok(())
    }

    /// Last successfully commanded logic level.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_closed(&self) -> bool {
        self.level == 0
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}
