//! Broadcast fan-out with listener-side filtering.

use whisper_bus::{Whisper, WhisperBus, BROADCAST};

use crate::support::Recorder;

#[test]
fn targeted_whisper_reaches_only_its_target() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Athena");
    recorder.listen(&bus, "Serafina");
    recorder.listen(&bus, "Lilybear");

    let stats = bus.publish("Lilybear", "Athena", "status").unwrap();

    // Transport-level fan-out: every listener was invoked.
    assert_eq!(stats.notified, 3);
    assert_eq!(
        recorder.received("Athena"),
        vec![Whisper::new("Lilybear", "Athena", "status")]
    );
    assert!(recorder.received("Serafina").is_empty());
    assert!(recorder.received("Lilybear").is_empty());
}

#[test]
fn broadcast_reaches_everyone_with_the_same_triple() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Athena");
    recorder.listen(&bus, "Serafina");
    recorder.listen(&bus, "Lilybear");

    bus.publish("Lilybear", BROADCAST, "The council is assembled.")
        .unwrap();

    let expected = Whisper::new("Lilybear", "*", "The council is assembled.");
    for name in ["Athena", "Serafina", "Lilybear"] {
        assert_eq!(recorder.received(name), vec![expected.clone()], "{name}");
    }
    assert_eq!(recorder.order(), vec!["Athena", "Serafina", "Lilybear"]);
}

#[test]
fn duplicate_names_both_receive() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Guard");
    recorder.listen(&bus, "Guard");

    bus.publish("X", "Guard", "hi").unwrap();

    assert_eq!(recorder.received("Guard").len(), 2);
    assert_eq!(bus.listener_names(), vec!["Guard", "Guard"]);
}

#[test]
fn same_whisper_twice_is_delivered_twice() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Athena");

    bus.publish("Lilybear", "Athena", "status").unwrap();
    bus.publish("Lilybear", "Athena", "status").unwrap();

    assert_eq!(recorder.received("Athena").len(), 2);
}

#[test]
fn unfiltered_listener_observes_all_traffic() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Athena");
    recorder.observe(&bus, "Monitor");

    bus.publish("Lilybear", "Athena", "status").unwrap();
    bus.publish("Lilybear", "Serafina", "bless").unwrap();
    bus.publish("Lilybear", "nobody", "echo").unwrap();

    assert_eq!(recorder.received("Athena").len(), 1);
    let seen: Vec<String> = recorder
        .received("Monitor")
        .into_iter()
        .map(|w| w.to)
        .collect();
    assert_eq!(seen, vec!["Athena", "Serafina", "nobody"]);
}

#[test]
fn unmatched_target_is_not_an_error() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Athena");

    let stats = bus.publish("Lilybear", "Nobody", "hello?").unwrap();

    assert_eq!(stats.notified, 1);
    assert_eq!(recorder.len(), 0);
}

#[test]
fn whisper_is_publish_with_sender() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();
    recorder.listen(&bus, "Lilybear");

    bus.whisper("Athena", "Lilybear", "Athena: All systems nominal.")
        .unwrap();

    assert_eq!(
        recorder.received("Lilybear"),
        vec![Whisper::new("Athena", "Lilybear", "Athena: All systems nominal.")]
    );
}
