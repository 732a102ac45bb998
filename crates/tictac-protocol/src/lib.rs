//! Wire protocol for Tictac.
//!
//! This crate defines the "language" browser clients and the server
//! speak:
//!
//! - **Types** ([`Symbol`], [`BoardCells`], [`Winner`], [`RoomCode`]):
//!   the values carried inside messages.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`Recipient`]):
//!   named events and where server events are delivered.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how messages become
//!   bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (messages) → Room registry (game state)
//! ```

mod codec;
mod error;
mod messages;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use messages::{ClientMessage, MoveRequest, Recipient, ServerMessage};
pub use types::{
    BOARD_CELLS, BoardCells, ROOM_CODE_LEN, RoomCode, Symbol, Winner,
};
