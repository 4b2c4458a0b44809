//! Bridge configuration.
//!
//! Read from the environment by `whisperd`; embedders can also deserialize it
//! from any serde format.
//!
//! | Variable              | Field               | Default                 |
//! |-----------------------|---------------------|-------------------------|
//! | `MCP_URL`             | `mcp_url`           | `http://127.0.0.1:8080` |
//! | `WHISPER_ORIGIN`      | `origin`            | `Discord`               |
//! | `WHISPER_BRIDGE_NAME` | `bridge_name`       | `Bridge`                |
//! | `WHISPER_FORWARD`     | `forward_targets`   | empty                   |
//! | `WHISPER_BIND`        | `bind`              | `0.0.0.0:3000`          |
//! | `PEER_HANDSHAKE`      | `peers`             | empty                   |
//! | `WHISPER_REPO`        | `repo`              | `Serafina`              |
//!
//! List variables are comma-separated; blanks are dropped.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the MCP service exposing `/osc`.
    #[serde(default = "default_mcp_url")]
    pub mcp_url: String,
    /// `from` used for whispers that enter through the bridges.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Name the outbound forwarder registers under.
    #[serde(default = "default_bridge_name")]
    pub bridge_name: String,
    /// Extra listener names the forwarder sends out.
    #[serde(default)]
    pub forward_targets: Vec<String>,
    /// Ingress listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Handshake endpoints.
    #[serde(default)]
    pub peers: Vec<String>,
    /// Name announced in the handshake.
    #[serde(default = "default_repo")]
    pub repo: String,
}

fn default_mcp_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_origin() -> String {
    "Discord".to_string()
}

fn default_bridge_name() -> String {
    "Bridge".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_repo() -> String {
    "Serafina".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mcp_url: default_mcp_url(),
            origin: default_origin(),
            bridge_name: default_bridge_name(),
            forward_targets: Vec::new(),
            bind: default_bind(),
            peers: Vec::new(),
            repo: default_repo(),
        }
    }
}

impl BridgeConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            mcp_url: get("MCP_URL").unwrap_or(defaults.mcp_url),
            origin: get("WHISPER_ORIGIN").unwrap_or(defaults.origin),
            bridge_name: get("WHISPER_BRIDGE_NAME").unwrap_or(defaults.bridge_name),
            forward_targets: get("WHISPER_FORWARD").map(|v| split_list(&v)).unwrap_or_default(),
            bind: get("WHISPER_BIND").unwrap_or(defaults.bind),
            peers: get("PEER_HANDSHAKE").map(|v| split_list(&v)).unwrap_or_default(),
            repo: get("WHISPER_REPO").unwrap_or(defaults.repo),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
