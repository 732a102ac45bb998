//! Server configuration.

use serde::Deserialize;
use tictac_protocol::RoomCode;

/// Where the server listens and how it describes itself to players.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address for the WebSocket listener.
    pub bind_addr: String,
    /// Base URL the game page is served from. Shareable game links are
    /// built from it.
    pub public_url: String,
}

impl ServerConfig {
    /// The link a room creator shares with their opponent.
    pub fn game_link(&self, code: &RoomCode) -> String {
        format!("{}/?room={}", self.public_url.trim_end_matches('/'), code)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            public_url: "http://localhost:3000".to_string(),
        }
    }
}
