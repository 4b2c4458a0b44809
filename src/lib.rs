pub mod bridge;
pub mod bus;
pub mod config;
mod error;
pub mod guardian;
mod whisper;

pub use bus::{DeliveryStats, Subscription, WeakWhisperBus, WhisperBus, MAX_DEPTH};
pub use config::BridgeConfig;
pub use error::{BridgeError, BusError, ListenerError};
pub use guardian::{attach, dispatch, Guardian, Whisperer};
pub use whisper::{Whisper, BROADCAST};

/// Alias for `Whisper` when talking about the bus in general terms.
pub type Message = Whisper;
