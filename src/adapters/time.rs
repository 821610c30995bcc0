//! System clock adapter.
//!
//! Implements [`ClockPort`] with a plain blocking sleep.  On the ESP-IDF
//! target `std::thread::sleep` suspends the calling FreeRTOS task, which is
//! exactly what the hold contract wants: the HTTP worker running the recipe
//! stalls for the pulse duration while other workers keep serving (and get
//! Busy from the sequencer).

use core::time::Duration;

use crate::app::ports::ClockPort;

/// Wall-clock hold provider for production use on both targets.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn hold(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
