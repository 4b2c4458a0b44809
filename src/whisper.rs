//! The message that travels over the bus.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved target meaning "every listener".
pub const BROADCAST: &str = "*";

/// A single whisper: who sent it, who it is for, and what it says.
///
/// Whispers have no identity of their own. Publishing the same triple twice
/// produces two independent deliveries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whisper {
    pub from: String,
    pub to: String,
    pub body: String,
}

impl Whisper {
    pub fn new(from: impl Into<String>, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            body: body.into(),
        }
    }

    /// True when `to` is the broadcast wildcard.
    pub fn is_broadcast(&self) -> bool {
        self.to == BROADCAST
    }

    /// True when a listener named `name` should act on this whisper.
    pub fn is_for(&self, name: &str) -> bool {
        self.to == name || self.is_broadcast()
    }
}

impl fmt::Display for Whisper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.body)
    }
}
