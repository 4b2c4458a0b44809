use std::sync::Mutex;

use super::{LILYBEAR, SHADOW_FLOWERS};
use crate::error::ListenerError;
use crate::guardian::{Guardian, Whisperer};

/// Line shown in the hall once a blessing is delivered.
pub const BLESSING_LINE: &str = "\u{1F338} May your path be protected and your heart be held.";

/// Sentiment and rituals. Shows the blessing and confirms to Lilybear.
#[derive(Debug, Default)]
pub struct ShadowFlowers {
    blessing_text: Mutex<Option<String>>,
}

impl ShadowFlowers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently displayed, if a blessing has been delivered.
    pub fn blessing_text(&self) -> Option<String> {
        self.blessing_text
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Guardian for ShadowFlowers {
    fn name(&self) -> &str {
        SHADOW_FLOWERS
    }

    fn role(&self) -> &str {
        "Sentiment & Rituals"
    }

    fn on_message(&self, _from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError> {
        if body.contains("blessing") {
            *self.blessing_text.lock().unwrap_or_else(|e| e.into_inner()) =
                Some(BLESSING_LINE.to_string());
            reply.whisper(LILYBEAR, "Blessing delivered.")?;
        }
        Ok(())
    }
}
