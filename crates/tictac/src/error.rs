//! Unified error type for the Tictac server.

use tictac_protocol::ProtocolError;
use tictac_room::RoomError;
use tictac_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TictacError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, bad room code).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (full, not found).
    #[error(transparent)]
    Room(#[from] RoomError),
}
