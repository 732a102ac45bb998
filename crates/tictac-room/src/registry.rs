//! Room registry: creates, tracks, and tears down rooms.

use std::collections::HashMap;

use tictac_protocol::{BoardCells, RoomCode, Symbol};
use tictac_transport::ConnectionId;

use crate::game::{apply_move, MoveOutcome};
use crate::{Room, RoomError, RoomStatus, MAX_PLAYERS};

/// Produces a candidate code for each new room.
pub type CodeSource = Box<dyn FnMut() -> RoomCode + Send + Sync>;

/// A successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinResult {
    pub code: RoomCode,
    /// The symbol the joiner plays.
    pub symbol: Symbol,
    pub board: BoardCells,
    pub current_player: Symbol,
    /// Number of players after the join.
    pub players: usize,
}

/// A move that reached an existing room, accepted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub code: RoomCode,
    pub outcome: MoveOutcome,
    /// The board after the move.
    pub board: BoardCells,
}

/// A room that was reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restarted {
    pub code: RoomCode,
    pub board: BoardCells,
    pub current_player: Symbol,
}

/// What happened to a room when one of its connections went away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The last player left and the room is gone.
    RoomDestroyed(RoomCode),
    /// Someone is still seated and should be told.
    OpponentLeft(RoomCode),
}

/// Every active room, keyed by code.
///
/// The registry is plain data: callers serialize access to it (the
/// server keeps it behind one mutex) so each operation runs to
/// completion before the next begins.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Room>,
    /// Codes in creation order; scans go through this, not the map.
    order: Vec<RoomCode>,
    next_code: CodeSource,
}

impl RoomRegistry {
    /// Creates an empty registry drawing random codes.
    pub fn new() -> Self {
        Self::with_code_source(Box::new(RoomCode::generate))
    }

    /// Creates an empty registry drawing codes from `source`.
    pub fn with_code_source(source: CodeSource) -> Self {
        Self {
            rooms: HashMap::new(),
            order: Vec::new(),
            next_code: source,
        }
    }

    /// Opens a room with `requester` as its only player and returns its
    /// code.
    ///
    /// One code is drawn. If it is already in use the old room is
    /// replaced and the new one takes its place in creation order.
    pub fn create_room(&mut self, requester: ConnectionId) -> RoomCode {
        let code = (self.next_code)();
        let room = Room::new(code.clone(), requester);
        match self.rooms.insert(code.clone(), room) {
            Some(old) => {
                tracing::warn!(
                    room = %code,
                    evicted_players = old.players.len(),
                    "room code collision, replacing existing room"
                );
            }
            None => self.order.push(code.clone()),
        }
        tracing::info!(room = %code, conn_id = %requester, "room created");
        code
    }

    /// Seats `requester` in the room named by `raw_code`.
    ///
    /// The code is matched case-insensitively. A second seat starts the
    /// game.
    pub fn join_room(
        &mut self,
        raw_code: &str,
        requester: ConnectionId,
    ) -> Result<JoinResult, RoomError> {
        let room = self
            .lookup_mut(raw_code)
            .ok_or_else(|| RoomError::NotFound(raw_code.to_owned()))?;

        if room.players.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull(room.code.clone()));
        }

        room.players.push(requester);
        room.set_status(RoomStatus::Playing);
        tracing::info!(room = %room.code, conn_id = %requester, "player joined");

        Ok(JoinResult {
            code: room.code.clone(),
            symbol: room.symbol_for(requester),
            board: room.board.cells(),
            current_player: room.current_player,
            players: room.players.len(),
        })
    }

    /// Applies a move to the room named by `raw_code`.
    ///
    /// Returns `None` if there is no such room. A rejected move comes
    /// back as [`MoveOutcome::Ignored`] with the room untouched.
    pub fn make_move(
        &mut self,
        raw_code: &str,
        cell_index: usize,
        symbol: Symbol,
    ) -> Option<MoveResult> {
        let room = self.lookup_mut(raw_code)?;
        let outcome = apply_move(room, cell_index, symbol);
        match outcome {
            MoveOutcome::Ignored(reason) => {
                tracing::debug!(room = %room.code, cell_index, %symbol, %reason, "move ignored");
            }
            MoveOutcome::Won(winner) => {
                tracing::info!(room = %room.code, %winner, "game won");
            }
            MoveOutcome::Draw => {
                tracing::info!(room = %room.code, "game drawn");
            }
            MoveOutcome::Continue { .. } => {}
        }
        Some(MoveResult {
            code: room.code.clone(),
            outcome,
            board: room.board.cells(),
        })
    }

    /// Resets the room named by `raw_code`, whatever its status.
    ///
    /// Returns `None` if there is no such room.
    pub fn restart(&mut self, raw_code: &str) -> Option<Restarted> {
        let room = self.lookup_mut(raw_code)?;
        room.restart();
        tracing::info!(room = %room.code, "game restarted");
        Some(Restarted {
            code: room.code.clone(),
            board: room.board.cells(),
            current_player: room.current_player,
        })
    }

    /// Takes one seat held by `conn` out of the oldest room holding
    /// it.
    ///
    /// An emptied room is destroyed. A room with someone left keeps its
    /// status. Returns `None` if `conn` was in no room.
    pub fn remove_connection(
        &mut self,
        conn: ConnectionId,
    ) -> Option<Departure> {
        let code = self.room_of(conn)?.clone();
        let room = self.rooms.get_mut(&code)?;
        if let Some(pos) = room.players.iter().position(|p| *p == conn) {
            room.players.remove(pos);
        }

        if room.players.is_empty() {
            self.rooms.remove(&code);
            self.order.retain(|c| *c != code);
            tracing::info!(room = %code, conn_id = %conn, "room destroyed");
            Some(Departure::RoomDestroyed(code))
        } else {
            tracing::info!(room = %code, conn_id = %conn, "player left");
            Some(Departure::OpponentLeft(code))
        }
    }

    /// Looks a room up by exact code.
    pub fn room(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    /// The room's broadcast group: its players in seat order. Empty if
    /// the room does not exist.
    pub fn members(&self, code: &RoomCode) -> Vec<ConnectionId> {
        self.rooms
            .get(code)
            .map(|room| room.players.clone())
            .unwrap_or_default()
    }

    /// The code of the oldest room `conn` is seated in.
    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomCode> {
        self.order.iter().find(|code| {
            self.rooms.get(*code).is_some_and(|room| room.contains(conn))
        })
    }

    /// Number of active rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// A code that does not parse cannot name a room.
    fn lookup_mut(&mut self, raw_code: &str) -> Option<&mut Room> {
        let code = RoomCode::parse(raw_code).ok()?;
        self.rooms.get_mut(&code)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms)
            .finish_non_exhaustive()
    }
}
