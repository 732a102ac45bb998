//! Core value types that travel on the wire.
//!
//! The small building blocks [`ServerMessage`](crate::ServerMessage) and
//! [`ClientMessage`](crate::ClientMessage) are made of: player symbols,
//! the serialized board, the game result, and room codes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// One of the two markers a player places on the board.
///
/// Unit variants of a plain serde enum serialize as their name, so
/// `Symbol::X` is `"X"` on the wire, which is exactly what browser
/// clients compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

// ---------------------------------------------------------------------------
// Board wire form
// ---------------------------------------------------------------------------

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// The board as it is sent to clients: nine cells, row-major, each
/// `null`, `"X"` or `"O"`.
pub type BoardCells = [Option<Symbol>; BOARD_CELLS];

// ---------------------------------------------------------------------------
// Winner
// ---------------------------------------------------------------------------

/// The result carried by a `gameOver` message.
///
/// Serialized as `"X"`, `"O"` or `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl Winner {
    /// Returns the winning symbol, or `None` for a draw.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Self::X => Some(Symbol::X),
            Self::O => Some(Symbol::O),
            Self::Draw => None,
        }
    }
}

impl From<Symbol> for Winner {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Self::X,
            Symbol::O => Self::O,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomCode
// ---------------------------------------------------------------------------

/// Length of a room code.
pub const ROOM_CODE_LEN: usize = 6;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A short code identifying a room: six uppercase ASCII letters or digits.
///
/// Codes are always stored normalized, so two codes compare equal
/// regardless of the case a client typed them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Parses and normalizes a code entered by a client.
    ///
    /// Letters are uppercased; nothing else is rewritten, so padding
    /// around a code makes it invalid.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidRoomCode`] unless the result is
    /// exactly six ASCII alphanumerics.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let code = raw.to_ascii_uppercase();
        if code.len() == ROOM_CODE_LEN
            && code.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            Ok(Self(code))
        } else {
            Err(ProtocolError::InvalidRoomCode(raw.to_string()))
        }
    }

    /// Draws a random code from the thread-local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Draws a random code from `rng`. The code space is 36^6.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..ROOM_CODE_ALPHABET.len());
                ROOM_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}
