//! Bridges between the bus and the outside world.
//!
//! - `inbound`: chat text -> whispers, by prefix rules.
//! - `outbound`: whispers -> `OscSink` (an HTTP endpoint in production).
//! - `http` (feature `http`): axum ingress routes and the reqwest sink.
//! - `handshake` (feature `http`): presence announcement to peers.

mod inbound;
mod outbound;

pub use inbound::{ChatMessage, CommandRoute, CommandRouter};
pub use outbound::{BufferSink, OscForwarder, OscPayload, OscSink};

#[cfg(feature = "http")]
pub mod handshake;
#[cfg(feature = "http")]
pub mod http;
