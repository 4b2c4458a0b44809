use std::sync::Mutex;

use tracing::info;

use super::LILYBEAR;
use crate::error::ListenerError;
use crate::guardian::{Guardian, Whisperer};
use crate::whisper::BROADCAST;

const ROUTE_PREFIX: &str = "/route ";

/// Voice and operations hub.
///
/// Remembers the last thing it heard and re-broadcasts anything sent as
/// `/route <payload>` to the whole council.
#[derive(Debug, Default)]
pub struct Lilybear {
    last_message: Mutex<Option<String>>,
}

impl Lilybear {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"{from}: {body}"` of the most recent whisper, if any.
    pub fn last_message(&self) -> Option<String> {
        self.last_message
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Guardian for Lilybear {
    fn name(&self) -> &str {
        LILYBEAR
    }

    fn role(&self) -> &str {
        "Voice & Operations"
    }

    fn on_message(&self, from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError> {
        *self.last_message.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(format!("{from}: {body}"));

        if let Some(payload) = body.strip_prefix(ROUTE_PREFIX) {
            info!(from, payload, "routing to the council");
            reply.whisper(BROADCAST, payload)?;
        }
        Ok(())
    }
}
