//! Client and server messages.
//!
//! Every frame on the wire is a JSON object naming an event and carrying
//! an optional payload:
//!
//! ```text
//! { "event": "makeMove", "data": { "roomId": "AB12CD", "cellIndex": 4, "symbol": "X" } }
//! { "event": "opponentDisconnected" }
//! ```
//!
//! `#[serde(tag = "event", content = "data")]` gives exactly this
//! "adjacently tagged" shape. Payload-less variants omit `data`.

use serde::{Deserialize, Serialize};
use tictac_transport::ConnectionId;

use crate::{BoardCells, RoomCode, Symbol, Winner};

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// Messages a browser client sends to the server.
///
/// Room ids arrive exactly as the client typed them; the room registry
/// normalizes them, so a malformed id behaves like an unknown room
/// instead of an undecodable frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Open a new room with the sender as its first player.
    CreateRoom,

    /// Join an existing room by code.
    JoinRoom(String),

    /// Place a symbol on the board.
    MakeMove(MoveRequest),

    /// Reset the board of a room.
    RestartGame(String),
}

/// Payload of [`ClientMessage::MakeMove`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub room_id: String,
    pub cell_index: usize,
    pub symbol: Symbol,
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// Messages the server sends, either to one connection or to every
/// connection in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// Reply to `createRoom`.
    RoomCreated {
        room_id: RoomCode,
        game_link: String,
        message: String,
    },

    /// Reply to a successful `joinRoom`.
    RoomJoined { room_id: RoomCode, message: String },

    /// Tells the joining player which symbol they play.
    AssignSymbol(Symbol),

    /// Room-wide: the second player arrived.
    GameStart {
        board: BoardCells,
        current_player: Symbol,
        players: usize,
    },

    /// Room-wide: a move was accepted and the game goes on.
    UpdateGame {
        board: BoardCells,
        current_player: Symbol,
    },

    /// Room-wide: the last move won or filled the board.
    GameOver {
        winner: Winner,
        board: BoardCells,
        message: String,
    },

    /// Room-wide: the board was reset.
    GameRestart {
        board: BoardCells,
        current_player: Symbol,
    },

    /// Room-wide: the other player's connection went away.
    OpponentDisconnected,

    /// Sent to the requester only, e.g. when a join fails.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Recipient: who should receive a message?
// ---------------------------------------------------------------------------

/// Where the server should deliver a [`ServerMessage`].
///
/// Room operations return `(Recipient, ServerMessage)` pairs; the
/// server resolves `Room` to the room's current members (its broadcast
/// group) at delivery time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// A single connection.
    Connection(ConnectionId),

    /// Every connection currently in the room.
    Room(RoomCode),
}
