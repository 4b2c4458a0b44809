//! whisperd - hosts a whisper bus with the council and both bridges.
//!
//! Configuration comes from the environment (see `whisper_bus::config`).
//! Logging honours `RUST_LOG`.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use whisper_bus::bridge::handshake::establish_handshake;
use whisper_bus::bridge::http::{self, HttpOscSink, IngressState};
use whisper_bus::bridge::{CommandRouter, OscForwarder};
use whisper_bus::guardian::council::Council;
use whisper_bus::{BridgeConfig, WhisperBus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let config = BridgeConfig::from_env();
    info!(mcp_url = %config.mcp_url, bind = %config.bind, "loaded config");

    let bus = WhisperBus::new();
    let council = Council::assemble(&bus)?;

    let client = reqwest::Client::new();
    let forwarder = OscForwarder::new(
        config.bridge_name.as_str(),
        HttpOscSink::with_client(client.clone(), &config.mcp_url),
    )
    .targets(config.forward_targets.iter().cloned())
    .attach(&bus)?;

    let peers = config.peers.clone();
    let repo = config.repo.clone();
    tokio::spawn(async move {
        let stats = establish_handshake(&client, &peers, &repo).await;
        info!(reached = stats.reached, failed = stats.failed, "handshake complete");
    });

    council.announce()?;

    let state = IngressState::new(CommandRouter::new(&bus, config.origin.as_str()));
    let listener = TcpListener::bind(&config.bind).await?;
    info!(bind = %config.bind, listeners = bus.len(), "whisperd listening");

    http::serve(listener, state, shutdown_signal()).await?;

    forwarder.unregister();
    council.disband();
    bus.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c, shutting down");
    }
    info!("shutdown requested");
}
