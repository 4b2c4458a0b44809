//! HTTP side of the bridges.
//!
//! Requires the `http` feature. Uses axum for the ingress and reqwest for
//! the outbound sink.
//!
//! ## Routes
//!
//! - `POST /osc` - body `{ "address": "/Athena", "value": "status" }`, published
//!   as `(origin, "Athena", "status")`.
//! - `POST /chat` - body `{ "author_is_bot": false, "content": "!status" }`,
//!   routed through the `CommandRouter`.
//! - `GET /health` - `{ "ok": true, "listeners": <n> }`.
//!
//! ## Example
//!
//! ```ignore
//! let bus = WhisperBus::new();
//! let state = IngressState::new(CommandRouter::new(&bus, "Discord"));
//! let listener = TcpListener::bind("0.0.0.0:3000").await?;
//! bridge::http::serve(listener, state, std::future::pending()).await?;
//! ```

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::inbound::{ChatMessage, CommandRouter};
use super::outbound::{OscPayload, OscSink};
use crate::bus::{DeliveryStats, WhisperBus};
use crate::error::BridgeError;

/// Shared state behind the ingress routes.
#[derive(Clone)]
pub struct IngressState {
    bus: WhisperBus,
    router: Arc<CommandRouter>,
}

impl IngressState {
    /// Whispers from `/osc` use the router's origin as their `from`.
    pub fn new(router: CommandRouter) -> Self {
        Self {
            bus: router.bus().clone(),
            router: Arc::new(router),
        }
    }

    pub fn bus(&self) -> &WhisperBus {
        &self.bus
    }
}

/// Build the ingress `Router`.
pub fn router(state: IngressState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/osc", post(osc_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
}

/// Serve the ingress on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: IngressState, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "bridge ingress listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler(State(state): State<IngressState>) -> impl IntoResponse {
    Json(json!({ "ok": true, "listeners": state.bus.len() }))
}

async fn osc_handler(
    State(state): State<IngressState>,
    Json(payload): Json<OscPayload>,
) -> Response {
    let result = payload.target().map(str::to_string).and_then(|target| {
        state
            .bus
            .publish(state.router.origin(), target, payload.value.as_str())
            .map_err(BridgeError::from)
    });
    match result {
        Ok(stats) => (StatusCode::OK, Json(stats_body(&stats))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn chat_handler(
    State(state): State<IngressState>,
    Json(message): Json<ChatMessage>,
) -> Response {
    match state.router.handle(&message) {
        Ok(Some(stats)) => {
            let mut body = stats_body(&stats);
            body["routed"] = json!(true);
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(None) => (StatusCode::OK, Json(json!({ "routed": false }))).into_response(),
        Err(e) => error_response(BridgeError::from(e)),
    }
}

fn stats_body(stats: &DeliveryStats) -> serde_json::Value {
    json!({
        "notified": stats.notified,
        "skipped": stats.skipped,
        "failed": stats.failed,
    })
}

fn error_response(e: BridgeError) -> Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Outbound sink that POSTs payloads as JSON to `<base>/osc`.
///
/// `send` spawns the request onto the current tokio runtime and returns
/// immediately; request failures are logged by the spawned task.
#[derive(Debug, Clone)]
pub struct HttpOscSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOscSink {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/osc", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one payload and wait for the response.
    pub async fn post(&self, payload: &OscPayload) -> Result<(), BridgeError> {
        self.client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl OscSink for HttpOscSink {
    fn send(&self, payload: OscPayload) -> Result<(), BridgeError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| BridgeError::Http(format!("no tokio runtime: {e}")))?;
        let sink = self.clone();
        runtime.spawn(async move {
            if let Err(error) = sink.post(&payload).await {
                error!(
                    endpoint = %sink.endpoint,
                    address = %payload.address,
                    %error,
                    "failed to send OSC message"
                );
            }
        });
        Ok(())
    }
}
