//! Whisper bus integration tests: addressing, registration and failure isolation.

mod support;
mod addressing;
mod failures;
