//! Error types for the protocol layer.
//!
//! Each crate in Tictac defines its own error enum, so a
//! `ProtocolError` always means something went wrong turning messages
//! into bytes or back, never in networking or room management.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, an unknown event name,
    /// or a payload of the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A room code was not six ASCII letters or digits.
    #[error("invalid room code: {0:?}")]
    InvalidRoomCode(String),
}
