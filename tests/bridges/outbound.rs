//! Whispers forwarded to an `OscSink`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use whisper_bus::bridge::{BufferSink, OscForwarder, OscPayload, OscSink};
use whisper_bus::guardian::council::Council;
use whisper_bus::{BridgeError, WhisperBus};

struct FlakySink {
    attempts: AtomicUsize,
}

impl OscSink for FlakySink {
    fn send(&self, _payload: OscPayload) -> Result<(), BridgeError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(BridgeError::Status(500))
    }
}

#[test]
fn forwarder_carries_target_and_body() {
    let bus = WhisperBus::new();
    let sink = BufferSink::new();
    OscForwarder::new("Bridge", sink.clone())
        .target("Unity")
        .attach(&bus)
        .unwrap();

    bus.publish("Athena", "Unity", "status report").unwrap();
    bus.publish("Athena", "Bridge", "ping").unwrap();
    bus.publish("Athena", "Lilybear", "not for the bridge").unwrap();

    assert_eq!(
        sink.sent(),
        vec![
            OscPayload {
                address: "/Unity".to_string(),
                value: "status report".to_string(),
            },
            OscPayload::new("Bridge", "ping"),
        ]
    );
}

#[test]
fn failing_sink_does_not_disturb_the_council() {
    let bus = WhisperBus::new();
    let sink = Arc::new(FlakySink {
        attempts: AtomicUsize::new(0),
    });
    OscForwarder::new("Bridge", Arc::clone(&sink))
        .target("Lilybear")
        .attach(&bus)
        .unwrap();
    let council = Council::assemble(&bus).unwrap();

    let stats = bus.publish("Discord", "Athena", "status").unwrap();

    // Athena's reply to Lilybear went through the forwarder and failed there.
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(
        council.lilybear.last_message().as_deref(),
        Some("Athena: Athena: All systems nominal.")
    );
}
