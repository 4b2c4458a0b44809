//! Handle returned by `WhisperBus::register`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tracing::debug;

use super::whisper_bus::Shared;

/// A live registration on a `WhisperBus`.
///
/// The handle's only job is `unregister`. Dropping it does not remove the
/// listener. It holds the bus weakly, so an outstanding handle never keeps
/// the bus alive.
pub struct Subscription {
    id: u64,
    name: String,
    active: Arc<AtomicBool>,
    bus: Weak<Shared>,
}

impl Subscription {
    pub(crate) fn new(id: u64, name: String, active: Arc<AtomicBool>, bus: Weak<Shared>) -> Self {
        Self {
            id,
            name,
            active,
            bus,
        }
    }

    /// Remove the listener. Calling this more than once is a no-op.
    ///
    /// A publish pass already in progress skips the listener from here on.
    pub fn unregister(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
        debug!(listener = %self.name, id = self.id, "listener unregistered");
    }

    /// Name the listener was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True until `unregister` is called or the bus shuts down.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub(crate) fn belongs_to(&self, shared: &Arc<Shared>) -> bool {
        std::ptr::eq(self.bus.as_ptr(), Arc::as_ptr(shared))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.is_active())
            .finish()
    }
}
