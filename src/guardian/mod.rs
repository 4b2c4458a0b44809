//! Guardians - named listeners that only act on whispers meant for them.
//!
//! A guardian implements one capability, `on_message`. Addressing is decided
//! once, in [`dispatch`]: a whisper reaches `on_message` only if its `to` is
//! the guardian's name or the broadcast wildcard.
//!
//! ```
//! use std::sync::Arc;
//! use whisper_bus::bus::WhisperBus;
//! use whisper_bus::guardian::{self, Guardian, Whisperer};
//! use whisper_bus::ListenerError;
//!
//! struct Echo;
//!
//! impl Guardian for Echo {
//!     fn name(&self) -> &str {
//!         "Echo"
//!     }
//!
//!     fn on_message(&self, from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError> {
//!         if from != "Echo" {
//!             reply.whisper(from, body)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let bus = WhisperBus::new();
//! let echo = Arc::new(Echo);
//! let _sub = guardian::attach(&bus, &echo).unwrap();
//! bus.publish("Lilybear", "Echo", "ping").unwrap();
//! ```

pub mod council;
mod whisperer;

use std::sync::Arc;

use tracing::debug;

use crate::bus::{Subscription, WhisperBus};
use crate::error::{BusError, ListenerError};
use crate::whisper::Whisper;

pub use whisperer::Whisperer;

/// A named listener with its own reaction logic.
pub trait Guardian: Send + Sync {
    /// Identifier this guardian answers to.
    fn name(&self) -> &str;

    /// Free-form description of what the guardian does.
    fn role(&self) -> &str {
        "Undefined"
    }

    /// Handle a whisper addressed to this guardian (or broadcast).
    fn on_message(&self, from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError>;
}

/// Apply the addressing filter and hand the whisper to the guardian.
///
/// Returns `Ok(false)` when the whisper was for someone else.
pub fn dispatch<G>(
    guardian: &G,
    whisper: &Whisper,
    reply: &Whisperer,
) -> Result<bool, ListenerError>
where
    G: Guardian + ?Sized,
{
    if !whisper.is_for(guardian.name()) {
        return Ok(false);
    }
    debug!(
        guardian = guardian.name(),
        from = %whisper.from,
        body = %whisper.body,
        "whisper received"
    );
    guardian.on_message(&whisper.from, &whisper.body, reply)?;
    Ok(true)
}

/// Register `guardian` on the bus under its own name.
///
/// The bus keeps only a weak reference: once the last `Arc` is dropped the
/// registration stays in the table but does nothing.
pub fn attach<G>(bus: &WhisperBus, guardian: &Arc<G>) -> Result<Subscription, BusError>
where
    G: Guardian + ?Sized + 'static,
{
    let name = guardian.name().to_string();
    let reply = Whisperer::new(bus, name.clone());
    let weak = Arc::downgrade(guardian);

    bus.register(name, move |whisper: &Whisper| match weak.upgrade() {
        Some(guardian) => dispatch(&*guardian, whisper, &reply).map(|_| ()),
        None => Ok(()),
    })
}
