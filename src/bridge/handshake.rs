//! Presence announcement to sibling services.
//!
//! Every peer gets a `POST` with `{ "repo": ..., "timestamp": ... }`. Peers
//! that cannot be reached are logged and counted; nothing is raised.

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Body sent to each peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakePayload {
    /// Which service is announcing itself.
    pub repo: String,
    /// RFC 3339 time of the attempt.
    pub timestamp: String,
}

impl HandshakePayload {
    pub fn now(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Outcome of one handshake round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeStats {
    /// Peers that answered, whatever the status code.
    pub reached: usize,
    /// Peers that could not be contacted.
    pub failed: usize,
}

/// Announce `repo` to every peer concurrently.
pub async fn establish_handshake(
    client: &reqwest::Client,
    peers: &[String],
    repo: &str,
) -> HandshakeStats {
    let mut stats = HandshakeStats::default();
    if peers.is_empty() {
        warn!("no peer endpoints configured");
        return stats;
    }

    let payload = HandshakePayload::now(repo);
    let mut tasks = JoinSet::new();
    for url in peers {
        let client = client.clone();
        let url = url.clone();
        let payload = payload.clone();
        tasks.spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) => {
                    info!(%url, status = resp.status().as_u16(), "handshake answered");
                    true
                }
                Err(e) => {
                    error!(%url, error = %e, "handshake failed");
                    false
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => stats.reached += 1,
            Ok(false) => stats.failed += 1,
            Err(e) => {
                error!(error = %e, "handshake task aborted");
                stats.failed += 1;
            }
        }
    }
    stats
}
