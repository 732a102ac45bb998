//! Move validation and terminal-state detection.
//!
//! Invalid moves are not errors: they leave the room untouched and the
//! sender hears nothing back. [`MoveOutcome::Ignored`] exists so callers
//! can log why, not so they can report it.

use tictac_protocol::{Symbol, Winner};

use crate::board::check_winner;
use crate::{Room, RoomStatus};

/// Why a move was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The room is waiting for a second player or the game is over.
    NotPlaying(RoomStatus),
    /// The cell is off the board or already taken.
    CellUnavailable(usize),
    /// The symbol is not the one whose turn it is.
    NotYourTurn { expected: Symbol },
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPlaying(status) => write!(f, "room is {status}"),
            Self::CellUnavailable(idx) => write!(f, "cell {idx} unavailable"),
            Self::NotYourTurn { expected } => {
                write!(f, "{expected} is to move")
            }
        }
    }
}

/// What an [`apply_move`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The move was placed and `next` is to move.
    Continue { next: Symbol },
    /// The move completed a line.
    Won(Symbol),
    /// The move filled the board without completing a line.
    Draw,
}

impl MoveOutcome {
    /// Returns `true` if the board changed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    /// The result to announce, if the move ended the game.
    pub fn winner(&self) -> Option<Winner> {
        match self {
            Self::Won(symbol) => Some(Winner::from(*symbol)),
            Self::Draw => Some(Winner::Draw),
            _ => None,
        }
    }
}

/// Validates and applies `symbol` at `cell_index`.
///
/// Rejected, with no state change, when the room is not playing, the
/// cell is off the board or taken, or it is not `symbol`'s turn. An
/// accepted move that completes a line or fills the board finishes the
/// room; otherwise the turn passes to the other symbol.
pub fn apply_move(
    room: &mut Room,
    cell_index: usize,
    symbol: Symbol,
) -> MoveOutcome {
    if !room.status.is_playing() {
        return MoveOutcome::Ignored(IgnoreReason::NotPlaying(room.status));
    }
    if !room.board.is_free(cell_index) {
        return MoveOutcome::Ignored(IgnoreReason::CellUnavailable(
            cell_index,
        ));
    }
    if symbol != room.current_player {
        return MoveOutcome::Ignored(IgnoreReason::NotYourTurn {
            expected: room.current_player,
        });
    }

    room.board.place(cell_index, symbol);

    if let Some(winner) = check_winner(&room.board) {
        room.set_status(RoomStatus::Finished);
        MoveOutcome::Won(winner)
    } else if room.board.is_full() {
        room.set_status(RoomStatus::Finished);
        MoveOutcome::Draw
    } else {
        room.current_player = room.current_player.other();
        MoveOutcome::Continue {
            next: room.current_player,
        }
    }
}
