//! Bridge integration tests.

mod inbound;
mod outbound;
