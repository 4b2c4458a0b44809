//! The registration table and the fan-out pass.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::{debug, info, warn};

use super::subscription::Subscription;
use crate::error::{BusError, ListenerError};
use crate::whisper::Whisper;

/// How many delivery passes may be nested on one thread.
///
/// A listener that publishes from its callback starts a nested pass on the
/// same stack. Past this depth the nested publish is refused with
/// [`BusError::TooDeep`] instead of recursing further.
pub const MAX_DEPTH: usize = 32;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Holds one level of the per-thread nesting count for the length of a pass.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Result<Self, BusError> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                return Err(BusError::TooDeep { depth: current });
            }
            depth.set(current + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Listener callback invoked once per publish.
pub type Callback = dyn Fn(&Whisper) -> Result<(), ListenerError> + Send + Sync;

/// Outcome of one publish pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Listeners whose callback returned successfully.
    pub notified: usize,
    /// Listeners that were unregistered after the pass started.
    pub skipped: usize,
    /// Listeners whose callback returned an error or panicked.
    pub failed: usize,
}

impl DeliveryStats {
    /// Number of callbacks that actually ran.
    pub fn invoked(&self) -> usize {
        self.notified + self.failed
    }
}

#[derive(Clone)]
struct Registration {
    id: u64,
    name: String,
    active: Arc<AtomicBool>,
    callback: Arc<Callback>,
}

#[derive(Default)]
struct Table {
    next_id: u64,
    closed: bool,
    entries: Vec<Registration>,
}

#[derive(Default)]
pub(crate) struct Shared {
    table: Mutex<Table>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Table> {
        // Callbacks never run under this lock, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn remove(&self, id: u64) {
        self.lock().entries.retain(|r| r.id != id);
    }
}

/// Process-wide whisper bus.
///
/// Construct one at the composition root and hand clones to every adapter
/// and guardian; all clones share the same registration table.
///
/// - Registration order is delivery order.
/// - Duplicate names are allowed; every registration receives the whisper.
/// - A failing or panicking listener is logged and counted, never propagated.
/// - Callbacks run outside the lock, so they may publish, register or
///   unregister re-entrantly.
#[derive(Clone, Default)]
pub struct WhisperBus {
    shared: Arc<Shared>,
}

impl WhisperBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener under `name`.
    ///
    /// Only fails once the bus has been shut down.
    pub fn register<F>(
        &self,
        name: impl Into<String>,
        callback: F,
    ) -> Result<Subscription, BusError>
    where
        F: Fn(&Whisper) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut table = self.shared.lock();
        if table.closed {
            return Err(BusError::Closed);
        }

        let id = table.next_id;
        table.next_id += 1;
        let active = Arc::new(AtomicBool::new(true));
        table.entries.push(Registration {
            id,
            name: name.clone(),
            active: Arc::clone(&active),
            callback: Arc::new(callback),
        });
        debug!(listener = %name, id, listeners = table.entries.len(), "listener registered");

        Ok(Subscription::new(id, name, active, Arc::downgrade(&self.shared)))
    }

    /// Remove the registration behind `subscription`.
    ///
    /// No-op if it was already removed or belongs to another bus.
    pub fn unregister(&self, subscription: &Subscription) {
        if subscription.belongs_to(&self.shared) {
            subscription.unregister();
        }
    }

    /// Deliver `(from, to, body)` to every registered listener, in order.
    pub fn publish(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<DeliveryStats, BusError> {
        self.deliver(&Whisper::new(from, to, body))
    }

    /// Reply helper for listeners; same as `publish(sender, to, body)`.
    pub fn whisper(
        &self,
        sender: &str,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<DeliveryStats, BusError> {
        self.publish(sender, to, body)
    }

    /// Deliver an already-built whisper.
    ///
    /// Fails with [`BusError::TooDeep`] when called from a listener already
    /// [`MAX_DEPTH`] passes deep on this thread.
    pub fn deliver(&self, whisper: &Whisper) -> Result<DeliveryStats, BusError> {
        let snapshot = {
            let table = self.shared.lock();
            if table.closed {
                return Err(BusError::Closed);
            }
            table.entries.clone()
        };

        let _depth = DepthGuard::enter().map_err(|error| {
            warn!(
                from = %whisper.from,
                to = %whisper.to,
                %error,
                "nested publish refused"
            );
            error
        })?;

        info!(listeners = snapshot.len(), "{}", whisper);
        if snapshot.is_empty() {
            debug!(from = %whisper.from, to = %whisper.to, "no listeners registered");
        }

        let mut stats = DeliveryStats::default();
        for registration in &snapshot {
            if !registration.active.load(Ordering::SeqCst) {
                stats.skipped += 1;
                continue;
            }

            let callback = registration.callback.as_ref();
            match panic::catch_unwind(AssertUnwindSafe(|| callback(whisper))) {
                Ok(Ok(())) => stats.notified += 1,
                Ok(Err(error)) => {
                    stats.failed += 1;
                    warn!(
                        from = %whisper.from,
                        to = %whisper.to,
                        listener = %registration.name,
                        %error,
                        "listener failed"
                    );
                }
                Err(payload) => {
                    stats.failed += 1;
                    warn!(
                        from = %whisper.from,
                        to = %whisper.to,
                        listener = %registration.name,
                        panic = panic_message(payload.as_ref()),
                        "listener panicked"
                    );
                }
            }
        }

        Ok(stats)
    }

    /// Tear the bus down: drop every registration and refuse further use.
    pub fn shutdown(&self) {
        let mut table = self.shared.lock();
        if table.closed {
            return;
        }
        table.closed = true;
        for registration in table.entries.drain(..) {
            registration.active.store(false, Ordering::SeqCst);
        }
        info!("whisper bus shut down");
    }

    /// Handle that does not keep the bus alive.
    pub fn downgrade(&self) -> WeakWhisperBus {
        WeakWhisperBus {
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.shared.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().entries.is_empty()
    }

    /// Registered names in delivery order, duplicates included.
    pub fn listener_names(&self) -> Vec<String> {
        self.shared
            .lock()
            .entries
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

/// Non-owning handle to a `WhisperBus`.
///
/// Listeners that need to publish keep one of these so the registration
/// table never holds a strong reference back to itself.
#[derive(Clone, Default)]
pub struct WeakWhisperBus {
    shared: Weak<Shared>,
}

impl WeakWhisperBus {
    /// `None` once every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<WhisperBus> {
        self.shared.upgrade().map(|shared| WhisperBus { shared })
    }
}

impl fmt::Debug for WeakWhisperBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakWhisperBus")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for WhisperBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.shared.lock();
        f.debug_struct("WhisperBus")
            .field("listeners", &table.entries.len())
            .field("closed", &table.closed)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
