//! Turns client messages into registry operations and the replies they
//! produce.
//!
//! Nothing here touches the network. Each function returns
//! `(Recipient, ServerMessage)` pairs in the order they must arrive;
//! the hub delivers them.

use tictac_protocol::{ClientMessage, MoveRequest, Recipient, ServerMessage, Winner};
use tictac_room::{Departure, MoveOutcome, RoomRegistry};
use tictac_transport::ConnectionId;

use crate::ServerConfig;

/// Replies to one decoded message from `sender`.
pub(crate) type Outbound = Vec<(Recipient, ServerMessage)>;

/// Applies `msg` from `sender` to the registry.
pub(crate) fn handle_message(
    registry: &mut RoomRegistry,
    config: &ServerConfig,
    sender: ConnectionId,
    msg: ClientMessage,
) -> Outbound {
    match msg {
        ClientMessage::CreateRoom => create_room(registry, config, sender),
        ClientMessage::JoinRoom(room_id) => join_room(registry, sender, &room_id),
        ClientMessage::MakeMove(request) => make_move(registry, sender, request),
        ClientMessage::RestartGame(room_id) => restart(registry, sender, &room_id),
    }
}

/// Removes `conn` from its room and tells whoever is left.
pub(crate) fn handle_disconnect(
    registry: &mut RoomRegistry,
    conn: ConnectionId,
) -> Outbound {
    match registry.remove_connection(conn) {
        Some(Departure::OpponentLeft(code)) => {
            vec![(Recipient::Room(code), ServerMessage::OpponentDisconnected)]
        }
        Some(Departure::RoomDestroyed(_)) | None => Vec::new(),
    }
}

fn create_room(
    registry: &mut RoomRegistry,
    config: &ServerConfig,
    sender: ConnectionId,
) -> Outbound {
    let code = registry.create_room(sender);
    let reply = ServerMessage::RoomCreated {
        game_link: config.game_link(&code),
        message: format!("Room {code} created!"),
        room_id: code,
    };
    vec![(Recipient::Connection(sender), reply)]
}

fn join_room(
    registry: &mut RoomRegistry,
    sender: ConnectionId,
    room_id: &str,
) -> Outbound {
    let joined = match registry.join_room(room_id, sender) {
        Ok(joined) => joined,
        Err(e) => {
            tracing::debug!(conn_id = %sender, room_id, error = %e, "join refused");
            return vec![(
                Recipient::Connection(sender),
                ServerMessage::Error {
                    message: e.to_string(),
                },
            )];
        }
    };

    vec![
        (
            Recipient::Connection(sender),
            ServerMessage::RoomJoined {
                message: format!("You are in room {}", joined.code),
                room_id: joined.code.clone(),
            },
        ),
        (
            Recipient::Connection(sender),
            ServerMessage::AssignSymbol(joined.symbol),
        ),
        (
            Recipient::Room(joined.code),
            ServerMessage::GameStart {
                board: joined.board,
                current_player: joined.current_player,
                players: joined.players,
            },
        ),
    ]
}

fn make_move(
    registry: &mut RoomRegistry,
    sender: ConnectionId,
    request: MoveRequest,
) -> Outbound {
    let Some(result) =
        registry.make_move(&request.room_id, request.cell_index, request.symbol)
    else {
        tracing::debug!(conn_id = %sender, room_id = %request.room_id, "move for unknown room");
        return Vec::new();
    };

    let update = match result.outcome {
        MoveOutcome::Ignored(_) => return Vec::new(),
        MoveOutcome::Continue { next } => ServerMessage::UpdateGame {
            board: result.board,
            current_player: next,
        },
        MoveOutcome::Won(symbol) => ServerMessage::GameOver {
            winner: Winner::from(symbol),
            board: result.board,
            message: format!("Winner: {symbol}!"),
        },
        MoveOutcome::Draw => ServerMessage::GameOver {
            winner: Winner::Draw,
            board: result.board,
            message: "Draw!".to_string(),
        },
    };
    vec![(Recipient::Room(result.code), update)]
}

fn restart(
    registry: &mut RoomRegistry,
    sender: ConnectionId,
    room_id: &str,
) -> Outbound {
    match registry.restart(room_id) {
        Some(restarted) => vec![(
            Recipient::Room(restarted.code),
            ServerMessage::GameRestart {
                board: restarted.board,
                current_player: restarted.current_player,
            },
        )],
        None => {
            tracing::debug!(conn_id = %sender, room_id, "restart for unknown room");
            Vec::new()
        }
    }
}
