//! A single room: two seats, one board.

use std::time::SystemTime;

use tictac_protocol::{RoomCode, Symbol};
use tictac_transport::ConnectionId;

use crate::{Board, RoomStatus};

/// One game session, identified by its code.
///
/// `players` is ordered: whoever sits in seat 0 plays X, seat 1 plays O.
#[derive(Debug, Clone)]
pub struct Room {
    pub(crate) code: RoomCode,
    pub(crate) players: Vec<ConnectionId>,
    pub(crate) board: Board,
    pub(crate) current_player: Symbol,
    pub(crate) status: RoomStatus,
    pub(crate) created_at: SystemTime,
}

impl Room {
    /// Opens a room with `creator` as its only player.
    pub(crate) fn new(code: RoomCode, creator: ConnectionId) -> Self {
        Self {
            code,
            players: vec![creator],
            board: Board::new(),
            current_player: Symbol::X,
            status: RoomStatus::Waiting,
            created_at: SystemTime::now(),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Connections in seat order.
    pub fn players(&self) -> &[ConnectionId] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose move it is. Only meaningful while the room is playing.
    pub fn current_player(&self) -> Symbol {
        self.current_player
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// When the room was opened. Diagnostic only.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns `true` if `conn` occupies a seat.
    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.players.contains(&conn)
    }

    /// The symbol `conn` plays: X for the first seat, O otherwise.
    pub fn symbol_for(&self, conn: ConnectionId) -> Symbol {
        if self.players.first() == Some(&conn) {
            Symbol::X
        } else {
            Symbol::O
        }
    }

    /// Clears the board and hands the first move to X, whatever the
    /// current status.
    pub(crate) fn restart(&mut self) {
        self.board.clear();
        self.current_player = Symbol::X;
        self.set_status(RoomStatus::Playing);
    }

    pub(crate) fn set_status(&mut self, next: RoomStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "illegal room transition {} -> {}",
            self.status,
            next
        );
        self.status = next;
    }
}
