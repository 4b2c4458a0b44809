//! A failing listener never breaks delivery to the others.

use whisper_bus::{ListenerError, Whisper, WhisperBus};

use crate::support::Recorder;

#[test]
fn empty_bus_publish_returns_normally() {
    let bus = WhisperBus::new();
    let stats = bus.publish("Lilybear", "*", "anyone?").unwrap();
    assert_eq!(stats.invoked(), 0);
}

#[test]
fn erroring_listener_does_not_stop_the_rest() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();

    bus.register("A", |_: &Whisper| {
        Err(ListenerError::Rejected("downstream unavailable".to_string()))
    })
    .unwrap();
    recorder.listen(&bus, "B");
    recorder.listen(&bus, "C");

    let stats = bus.publish("X", "*", "hello").unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.notified, 2);
    let expected = vec![Whisper::new("X", "*", "hello")];
    assert_eq!(recorder.received("B"), expected);
    assert_eq!(recorder.received("C"), expected);
}

#[test]
fn panicking_listener_does_not_stop_the_rest() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();

    bus.register("A", |_: &Whisper| -> Result<(), ListenerError> {
        panic!("listener blew up");
    })
    .unwrap();
    recorder.listen(&bus, "B");
    recorder.listen(&bus, "C");

    let stats = bus.publish("X", "*", "hello").unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(recorder.order(), vec!["B", "C"]);

    // The bus is still usable afterwards.
    let stats = bus.publish("X", "B", "again").unwrap();
    assert_eq!(stats.failed, 1);
    assert_eq!(recorder.received("B").len(), 2);
}

#[test]
fn boxed_errors_are_contained() {
    let bus = WhisperBus::new();
    let recorder = Recorder::new();

    bus.register("A", |_: &Whisper| {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "webhook down");
        Err(ListenerError::other(err))
    })
    .unwrap();
    recorder.listen(&bus, "B");

    let stats = bus.publish("X", "B", "hi").unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(recorder.received("B").len(), 1);
}
