//! Rooms and the tic-tac-toe rules for Tictac.
//!
//! Everything here is synchronous plain data. The server owns one
//! [`RoomRegistry`] behind a mutex and turns its results into messages.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: creates, joins, restarts, and tears down rooms
//! - [`Room`]: seats, board, turn, and status of one game
//! - [`apply_move`]: validates a move and detects wins and draws
//! - [`RoomStatus`]: lifecycle state machine

mod board;
mod error;
mod game;
mod registry;
mod room;
mod status;

pub use board::{check_winner, Board, WIN_PATTERNS};
pub use error::RoomError;
pub use game::{apply_move, IgnoreReason, MoveOutcome};
pub use registry::{
    CodeSource, Departure, JoinResult, MoveResult, Restarted, RoomRegistry,
};
pub use room::Room;
pub use status::{RoomStatus, MAX_PLAYERS};
