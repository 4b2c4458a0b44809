use super::{ATHENA, LILYBEAR};
use crate::error::ListenerError;
use crate::guardian::{Guardian, Whisperer};

/// Strategy and intelligence. Answers status requests back to Lilybear.
#[derive(Debug, Default, Clone, Copy)]
pub struct Athena;

impl Guardian for Athena {
    fn name(&self) -> &str {
        ATHENA
    }

    fn role(&self) -> &str {
        "Strategy & Intelligence"
    }

    fn on_message(&self, _from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError> {
        if body.contains("status") {
            reply.whisper(LILYBEAR, "Athena: All systems nominal.")?;
        }
        Ok(())
    }
}
