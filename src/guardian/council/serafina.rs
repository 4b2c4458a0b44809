use super::{SERAFINA, SHADOW_FLOWERS};
use crate::error::ListenerError;
use crate::guardian::{Guardian, Whisperer};

/// Comms and routing. Turns a `bless` into a request for ShadowFlowers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serafina;

impl Guardian for Serafina {
    fn name(&self) -> &str {
        SERAFINA
    }

    fn role(&self) -> &str {
        "Comms & Routing"
    }

    fn on_message(&self, _from: &str, body: &str, reply: &Whisperer) -> Result<(), ListenerError> {
        if body.starts_with("bless") {
            reply.whisper(SHADOW_FLOWERS, "Please deliver a blessing to the hall.")?;
        }
        Ok(())
    }
}
