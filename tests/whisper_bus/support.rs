//! Recording listeners shared by the bus tests.

use std::sync::{Arc, Mutex};

use whisper_bus::{Subscription, Whisper, WhisperBus};

/// Records every whisper a set of listeners acted on, tagged with the
/// listener's name, in delivery order.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<(String, Whisper)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a self-filtering listener: records only whispers for `name` or `*`.
    pub fn listen(&self, bus: &WhisperBus, name: &str) -> Subscription {
        let log = Arc::clone(&self.log);
        let me = name.to_string();
        bus.register(name, move |whisper: &Whisper| {
            if whisper.is_for(&me) {
                log.lock().unwrap().push((me.clone(), whisper.clone()));
            }
            Ok(())
        })
        .unwrap()
    }

    /// Register a listener that records all traffic regardless of `to`.
    pub fn observe(&self, bus: &WhisperBus, name: &str) -> Subscription {
        let log = Arc::clone(&self.log);
        let me = name.to_string();
        bus.register(name, move |whisper: &Whisper| {
            log.lock().unwrap().push((me.clone(), whisper.clone()));
            Ok(())
        })
        .unwrap()
    }

    /// Whispers recorded for `name`.
    pub fn received(&self, name: &str) -> Vec<Whisper> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, w)| w.clone())
            .collect()
    }

    /// Listener names in the order they recorded something.
    pub fn order(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}
