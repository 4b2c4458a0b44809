use crate::bus::{DeliveryStats, WeakWhisperBus, WhisperBus};
use crate::error::BusError;

/// Lets a listener reply on the bus under its own name.
///
/// Holds the bus weakly so a listener stored in the bus never keeps the bus
/// alive. Whispering after the bus is gone reports `BusError::Closed`.
#[derive(Clone, Debug)]
pub struct Whisperer {
    bus: WeakWhisperBus,
    sender: String,
}

impl Whisperer {
    pub fn new(bus: &WhisperBus, sender: impl Into<String>) -> Self {
        Self {
            bus: bus.downgrade(),
            sender: sender.into(),
        }
    }

    /// Identifier used as `from` on every whisper.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Publish `(sender, to, body)`.
    pub fn whisper(
        &self,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<DeliveryStats, BusError> {
        let bus = self.bus.upgrade().ok_or(BusError::Closed)?;
        bus.whisper(&self.sender, to, body)
    }
}
