//! Whispers out to an external endpoint.
//!
//! The forwarder is an ordinary bus listener. It picks the whispers it is
//! responsible for and hands them to an `OscSink` as
//! `{ "address": "/<to>", "value": "<body>" }`. Sink failures are logged
//! here and never reach the bus.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::bus::{Subscription, WhisperBus};
use crate::error::{BridgeError, BusError};
use crate::whisper::Whisper;

/// Wire payload for the OSC-over-HTTP bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscPayload {
    pub address: String,
    pub value: String,
}

impl OscPayload {
    pub fn new(to: &str, value: impl Into<String>) -> Self {
        Self {
            address: format!("/{to}"),
            value: value.into(),
        }
    }

    pub fn for_whisper(whisper: &Whisper) -> Self {
        Self::new(&whisper.to, whisper.body.clone())
    }

    /// Listener identifier encoded in `address`.
    pub fn target(&self) -> Result<&str, BridgeError> {
        let target = self.address.strip_prefix('/').unwrap_or(&self.address).trim();
        if target.is_empty() || target.contains('/') {
            return Err(BridgeError::InvalidAddress(self.address.clone()));
        }
        Ok(target)
    }
}

/// Destination for forwarded whispers.
///
/// Implementations must not block for long: they run inside a publish pass.
pub trait OscSink: Send + Sync {
    fn send(&self, payload: OscPayload) -> Result<(), BridgeError>;
}

impl<S: OscSink + ?Sized> OscSink for Arc<S> {
    fn send(&self, payload: OscPayload) -> Result<(), BridgeError> {
        (**self).send(payload)
    }
}

/// Sink that keeps payloads in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    sent: Arc<Mutex<Vec<OscPayload>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OscPayload> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl OscSink for BufferSink {
    fn send(&self, payload: OscPayload) -> Result<(), BridgeError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(payload);
        Ok(())
    }
}

/// Bus listener that forwards selected whispers to an `OscSink`.
///
/// Forwards whispers addressed to its own name or to any of its remote
/// targets; broadcasts only when `forward_broadcasts` is set.
pub struct OscForwarder<S> {
    name: String,
    targets: Vec<String>,
    forward_broadcasts: bool,
    sink: S,
}

impl<S: OscSink + 'static> OscForwarder<S> {
    pub fn new(name: impl Into<String>, sink: S) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
            forward_broadcasts: false,
            sink,
        }
    }

    /// Also forward whispers addressed to `target`.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn forward_broadcasts(mut self, enabled: bool) -> Self {
        self.forward_broadcasts = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this forwarder is responsible for `whisper`.
    pub fn accepts(&self, whisper: &Whisper) -> bool {
        if whisper.is_broadcast() {
            return self.forward_broadcasts;
        }
        whisper.to == self.name || self.targets.iter().any(|t| *t == whisper.to)
    }

    /// Hand `whisper` to the sink if it is ours. Never fails.
    pub fn forward(&self, whisper: &Whisper) {
        if !self.accepts(whisper) {
            return;
        }
        let payload = OscPayload::for_whisper(whisper);
        debug!(bridge = %self.name, address = %payload.address, "forwarding whisper");
        if let Err(error) = self.sink.send(payload) {
            error!(
                bridge = %self.name,
                from = %whisper.from,
                to = %whisper.to,
                %error,
                "failed to forward whisper"
            );
        }
    }

    /// Register on the bus under the forwarder's own name.
    pub fn attach(self, bus: &WhisperBus) -> Result<Subscription, BusError> {
        let name = self.name.clone();
        bus.register(name, move |whisper: &Whisper| {
            self.forward(whisper);
            Ok(())
        })
    }
}
