//! Whisper Bus - named-addressable publish/subscribe.
//!
//! Every publish fans out to every registered listener. The bus never routes
//! on `to`; each listener decides for itself whether a whisper is addressed
//! to it (its own name) or broadcast (`*`). A listener that wants to observe
//! all traffic simply ignores `to`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 WhisperBus (cloned handle)               │
//! │  register(name, cb) -> Subscription                      │
//! │  publish(from, to, body) -> DeliveryStats                │
//! └──────────────────────────────────────────────────────────┘
//!                            │  snapshot under one Mutex,
//!                            │  invoke in registration order
//!          ┌─────────────────┼──────────────────┐
//!          ▼                 ▼                  ▼
//!   ┌────────────┐    ┌────────────┐    ┌───────────────┐
//!   │  Guardian  │    │  Guardian  │    │ OscForwarder  │
//!   │ (filters)  │    │ (filters)  │    │ (bridge out)  │
//!   └────────────┘    └────────────┘    └───────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use whisper_bus::bus::WhisperBus;
//!
//! let bus = WhisperBus::new();
//! let sub = bus
//!     .register("Athena", |whisper| {
//!         if whisper.is_for("Athena") {
//!             println!("Athena heard {}", whisper.body);
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let stats = bus.publish("Lilybear", "Athena", "status").unwrap();
//! assert_eq!(stats.notified, 1);
//!
//! sub.unregister();
//! sub.unregister(); // idempotent
//! assert!(bus.is_empty());
//! ```

mod subscription;
mod whisper_bus;

pub use subscription::Subscription;
pub use whisper_bus::{Callback, DeliveryStats, WeakWhisperBus, WhisperBus, MAX_DEPTH};
