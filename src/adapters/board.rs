//! Relay board adapter — bridges the physical outputs to [`RelayPort`].
//!
//! Owns the three channel drivers; this is the only module in the system
//! that reaches real relay hardware.  On non-espidf targets the underlying
//! driver uses cfg-gated simulation stubs.

use crate::app::ports::RelayPort;
use crate::app::recipes::{Channel, Contact};
use crate::drivers::relay::RelayChannel;
use crate::error::ActuatorError;
use crate::pins;

/// Concrete adapter for the 3-channel relay board.
pub struct RelayBoard {
    ch1: RelayChannel,
    ch2: RelayChannel,
    ch3: RelayChannel,
}

impl RelayBoard {
    pub fn new() -> Self {
        Self {
            ch1: RelayChannel::new(pins::RELAY_CH1_GPIO),
            ch2: RelayChannel::new(pins::RELAY_CH2_GPIO),
            ch3: RelayChannel::new(pins::RELAY_CH3_GPIO),
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut RelayChannel {
        match channel {
            Channel::Ch1 => &mut self.ch1,
            Channel::Ch2 => &mut self.ch2,
            Channel::Ch3 => &mut self.ch3,
        }
    }

    /// Last commanded state of a contact (for diagnostics).
    pub fn contact(&self, channel: Channel) -> Contact {
        let ch = match channel {
            Channel::Ch1 => &self.ch1,
            Channel::Ch2 => &self.ch2,
            Channel::Ch3 => &self.ch3,
        };
        if ch.is_closed() { Contact::Closed } else { Contact::Open }
    }
}

impl Default for RelayBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for RelayBoard {
    fn set_contact(
        &mut self,
        channel: Channel,
        contact: Contact,
    ) -> Result<(), ActuatorError> {
        self.channel_mut(channel).set_level(contact.level())
    }
}
