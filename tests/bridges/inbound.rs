//! Chat commands become whispers.

use std::sync::{Arc, Mutex};

use whisper_bus::bridge::{ChatMessage, CommandRouter};
use whisper_bus::{BusError, Whisper, WhisperBus};

fn capture(bus: &WhisperBus) -> Arc<Mutex<Vec<Whisper>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.register("Capture", move |whisper: &Whisper| {
        sink.lock().unwrap().push(whisper.clone());
        Ok(())
    })
    .unwrap();
    seen
}

#[test]
fn status_and_bless_are_routed() {
    let bus = WhisperBus::new();
    let seen = capture(&bus);
    let router = CommandRouter::new(&bus, "Discord");

    router.handle(&ChatMessage::from_user("!STATUS")).unwrap();
    router.handle(&ChatMessage::from_user("!bless us all")).unwrap();
    router.handle(&ChatMessage::from_user("just chatting")).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            Whisper::new("Discord", "Athena", "status"),
            Whisper::new("Discord", "Serafina", "bless"),
        ]
    );
}

#[test]
fn custom_rules_extend_the_defaults() {
    let bus = WhisperBus::new();
    let seen = capture(&bus);
    let router = CommandRouter::new(&bus, "Discord").route("!Route ", "Lilybear", "/route hello");

    let stats = router
        .handle(&ChatMessage::from_user("!route anything"))
        .unwrap();

    assert_eq!(stats.map(|s| s.notified), Some(1));
    assert_eq!(router.routes().len(), 3);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![Whisper::new("Discord", "Lilybear", "/route hello")]
    );
}

#[test]
fn closed_bus_surfaces_to_the_adapter() {
    let bus = WhisperBus::new();
    let router = CommandRouter::new(&bus, "Discord");
    bus.shutdown();

    assert_eq!(
        router.handle(&ChatMessage::from_user("!status")),
        Err(BusError::Closed)
    );
}
