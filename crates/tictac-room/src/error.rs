//! Error types for the room layer.

use tictac_protocol::RoomCode;

/// Errors a requester can be told about.
///
/// Everything else the registry refuses (bad moves, restarts of unknown
/// rooms) is dropped without an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No active room has this code. Carries the id as the client sent
    /// it, since it may not even be a well-formed code.
    #[error("room {0} not found")]
    NotFound(String),

    /// The room already seats two players.
    #[error("room {0} is full")]
    RoomFull(RoomCode),
}
