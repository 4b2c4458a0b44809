//! Chat text in, whispers out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bus::{DeliveryStats, WhisperBus};
use crate::error::BusError;

/// A chat message as seen by the inbound bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Messages written by bots are never routed.
    #[serde(default)]
    pub author_is_bot: bool,
    pub content: String,
}

impl ChatMessage {
    pub fn from_user(content: impl Into<String>) -> Self {
        Self {
            author_is_bot: false,
            content: content.into(),
        }
    }
}

/// One prefix rule: chat text starting with `prefix` becomes `(to, body)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRoute {
    pub prefix: String,
    pub to: String,
    pub body: String,
}

/// Routes chat commands onto the bus by simple prefix matching.
///
/// Matching is case-insensitive and the first matching rule wins.
///
/// ```
/// use whisper_bus::bridge::{ChatMessage, CommandRouter};
/// use whisper_bus::bus::WhisperBus;
///
/// let bus = WhisperBus::new();
/// let router = CommandRouter::new(&bus, "Discord").route("!hug", "Lilybear", "hug");
///
/// assert!(router.handle(&ChatMessage::from_user("!STATUS please")).unwrap().is_some());
/// assert!(router.handle(&ChatMessage::from_user("hello")).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CommandRouter {
    bus: WhisperBus,
    origin: String,
    routes: Vec<CommandRoute>,
}

impl CommandRouter {
    /// Router with the standard council commands:
    /// `!status` -> Athena, `!bless` -> Serafina.
    pub fn new(bus: &WhisperBus, origin: impl Into<String>) -> Self {
        Self::empty(bus, origin)
            .route("!status", "Athena", "status")
            .route("!bless", "Serafina", "bless")
    }

    /// Router with no rules.
    pub fn empty(bus: &WhisperBus, origin: impl Into<String>) -> Self {
        Self {
            bus: bus.clone(),
            origin: origin.into(),
            routes: Vec::new(),
        }
    }

    /// Add a rule. Rules are tried in the order they were added.
    pub fn route(
        mut self,
        prefix: impl Into<String>,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.routes.push(CommandRoute {
            prefix: prefix.into().to_lowercase(),
            to: to.into(),
            body: body.into(),
        });
        self
    }

    pub fn routes(&self) -> &[CommandRoute] {
        &self.routes
    }

    pub fn bus(&self) -> &WhisperBus {
        &self.bus
    }

    /// Identifier used as `from` on routed whispers.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The rule that `content` would trigger, if any.
    pub fn match_route(&self, content: &str) -> Option<&CommandRoute> {
        let content = content.to_lowercase();
        self.routes.iter().find(|r| content.starts_with(&r.prefix))
    }

    /// Publish the whisper for `message`, if it matches a rule.
    ///
    /// `Ok(None)` means the message was ignored.
    pub fn handle(&self, message: &ChatMessage) -> Result<Option<DeliveryStats>, BusError> {
        if message.author_is_bot {
            debug!(content = %message.content, "ignoring bot message");
            return Ok(None);
        }

        let Some(route) = self.match_route(&message.content) else {
            debug!(content = %message.content, "no route for chat message");
            return Ok(None);
        };

        info!(prefix = %route.prefix, to = %route.to, "routing chat command");
        self.bus
            .publish(self.origin.as_str(), route.to.as_str(), route.body.as_str())
            .map(Some)
    }
}
