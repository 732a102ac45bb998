//! Integration tests for the Tictac server: real WebSocket clients
//! playing through a server bound to a random port.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tictac::prelude::*;
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

const EMPTY: [Option<Symbol>; 9] = [None; 9];

/// Hands out ROOM01, ROOM02, ... so tests can name rooms up front.
fn numbered_codes() -> CodeSource {
    let mut n = 0u32;
    Box::new(move || {
        n += 1;
        RoomCode::parse(&format!("ROOM{n:02}")).expect("valid code")
    })
}

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let server = TictacServerBuilder::new()
        .bind("127.0.0.1:0")
        .public_url("http://tictac.test")
        .code_source(numbered_codes())
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send(ws: &mut ClientWs, msg: &ClientMessage) {
    let text = serde_json::to_string(msg).expect("encode");
    ws.send(Message::Text(text.into())).await.expect("send");
}

async fn send_raw(ws: &mut ClientWs, text: &str) {
    ws.send(Message::Text(text.to_owned().into()))
        .await
        .expect("send");
}

/// Waits for the next server message, skipping control frames.
async fn recv(ws: &mut ClientWs) -> ServerMessage {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for server")
            .expect("stream ended")
            .expect("websocket error");
        match msg {
            Message::Text(_) | Message::Binary(_) => {
                return serde_json::from_slice(&msg.into_data())
                    .expect("decode server message");
            }
            _ => continue,
        }
    }
}

/// Asserts that nothing arrives within a short window.
async fn assert_silent(ws: &mut ClientWs) {
    let result =
        tokio::time::timeout(Duration::from_millis(150), ws.next()).await;
    assert!(result.is_err(), "unexpected message: {result:?}");
}

fn make_move(room: &str, cell_index: usize, symbol: Symbol) -> ClientMessage {
    ClientMessage::MakeMove(MoveRequest {
        room_id: room.into(),
        cell_index,
        symbol,
    })
}

/// Host creates ROOM01, guest joins; every setup message is consumed.
async fn start_game(addr: &str) -> (ClientWs, ClientWs) {
    let mut host = connect(addr).await;
    let mut guest = connect(addr).await;

    send(&mut host, &ClientMessage::CreateRoom).await;
    assert!(matches!(recv(&mut host).await, ServerMessage::RoomCreated { .. }));

    send(&mut guest, &ClientMessage::JoinRoom("ROOM01".into())).await;
    assert!(matches!(recv(&mut guest).await, ServerMessage::RoomJoined { .. }));
    assert_eq!(recv(&mut guest).await, ServerMessage::AssignSymbol(Symbol::O));
    assert!(matches!(recv(&mut guest).await, ServerMessage::GameStart { .. }));
    assert!(matches!(recv(&mut host).await, ServerMessage::GameStart { .. }));

    (host, guest)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_create_room_replies_with_code_and_link() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::CreateRoom).await;

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::RoomCreated {
            room_id: RoomCode::parse("ROOM01").unwrap(),
            game_link: "http://tictac.test/?room=ROOM01".into(),
            message: "Room ROOM01 created!".into(),
        }
    );
}

#[tokio::test]
async fn test_join_starts_game_for_both_players() {
    let addr = start_server().await;
    let mut host = connect(&addr).await;
    let mut guest = connect(&addr).await;

    send(&mut host, &ClientMessage::CreateRoom).await;
    recv(&mut host).await;

    send(&mut guest, &ClientMessage::JoinRoom("ROOM01".into())).await;

    assert_eq!(
        recv(&mut guest).await,
        ServerMessage::RoomJoined {
            room_id: RoomCode::parse("ROOM01").unwrap(),
            message: "You are in room ROOM01".into(),
        }
    );
    assert_eq!(recv(&mut guest).await, ServerMessage::AssignSymbol(Symbol::O));

    let start = ServerMessage::GameStart {
        board: EMPTY,
        current_player: Symbol::X,
        players: 2,
    };
    assert_eq!(recv(&mut guest).await, start);
    assert_eq!(recv(&mut host).await, start);
}

#[tokio::test]
async fn test_join_is_case_insensitive() {
    let addr = start_server().await;
    let mut host = connect(&addr).await;
    let mut guest = connect(&addr).await;

    send(&mut host, &ClientMessage::CreateRoom).await;
    recv(&mut host).await;

    send(&mut guest, &ClientMessage::JoinRoom("room01".into())).await;

    assert!(matches!(
        recv(&mut guest).await,
        ServerMessage::RoomJoined { room_id, .. } if room_id.as_str() == "ROOM01"
    ));
}

#[tokio::test]
async fn test_join_unknown_room_reports_error() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::JoinRoom("NOPE00".into())).await;

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::Error {
            message: "room NOPE00 not found".into()
        }
    );
}

#[tokio::test]
async fn test_third_player_gets_room_full() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;
    let mut late = connect(&addr).await;

    send(&mut late, &ClientMessage::JoinRoom("ROOM01".into())).await;

    assert_eq!(
        recv(&mut late).await,
        ServerMessage::Error {
            message: "room ROOM01 is full".into()
        }
    );
    assert_silent(&mut host).await;
    assert_silent(&mut guest).await;
}

#[tokio::test]
async fn test_x_wins_top_row() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;

    let moves = [
        (true, 0, Symbol::X),
        (false, 3, Symbol::O),
        (true, 1, Symbol::X),
        (false, 4, Symbol::O),
    ];
    let mut board = EMPTY;
    for (from_host, cell, symbol) in moves {
        let ws = if from_host { &mut host } else { &mut guest };
        send(ws, &make_move("ROOM01", cell, symbol)).await;
        board[cell] = Some(symbol);
        let update = ServerMessage::UpdateGame {
            board,
            current_player: symbol.other(),
        };
        assert_eq!(recv(&mut host).await, update);
        assert_eq!(recv(&mut guest).await, update);
    }

    send(&mut host, &make_move("ROOM01", 2, Symbol::X)).await;
    board[2] = Some(Symbol::X);

    let over = ServerMessage::GameOver {
        winner: Winner::X,
        board,
        message: "Winner: X!".into(),
    };
    assert_eq!(recv(&mut host).await, over);
    assert_eq!(recv(&mut guest).await, over);
}

#[tokio::test]
async fn test_full_board_is_draw() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;

    // X | O | X
    // X | O | X
    // O | X | O
    let cells = [0, 1, 2, 4, 3, 6, 5, 8, 7];
    let mut symbol = Symbol::X;
    for (i, cell) in cells.into_iter().enumerate() {
        let ws = if symbol == Symbol::X { &mut host } else { &mut guest };
        send(ws, &make_move("ROOM01", cell, symbol)).await;
        let msg = recv(&mut host).await;
        assert_eq!(recv(&mut guest).await, msg);
        if i < cells.len() - 1 {
            assert!(matches!(msg, ServerMessage::UpdateGame { .. }), "{msg:?}");
        } else {
            match msg {
                ServerMessage::GameOver { winner, message, board } => {
                    assert_eq!(winner, Winner::Draw);
                    assert_eq!(message, "Draw!");
                    assert!(board.iter().all(Option::is_some));
                }
                other => panic!("expected gameOver, got {other:?}"),
            }
        }
        symbol = symbol.other();
    }
}

#[tokio::test]
async fn test_invalid_moves_are_silently_ignored() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;

    // O out of turn, off-board cell, unknown room.
    send(&mut guest, &make_move("ROOM01", 0, Symbol::O)).await;
    send(&mut host, &make_move("ROOM01", 9, Symbol::X)).await;
    send(&mut host, &make_move("GHOST0", 0, Symbol::X)).await;
    // Then a legal move; it must be the first thing anyone hears.
    send(&mut host, &make_move("ROOM01", 0, Symbol::X)).await;

    let mut board = EMPTY;
    board[0] = Some(Symbol::X);
    let update = ServerMessage::UpdateGame {
        board,
        current_player: Symbol::O,
    };
    assert_eq!(recv(&mut host).await, update);
    assert_eq!(recv(&mut guest).await, update);

    // Occupied cell.
    send(&mut guest, &make_move("ROOM01", 0, Symbol::O)).await;
    assert_silent(&mut host).await;
    assert_silent(&mut guest).await;
}

#[tokio::test]
async fn test_restart_resets_board_for_room() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;

    send(&mut host, &make_move("ROOM01", 4, Symbol::X)).await;
    recv(&mut host).await;
    recv(&mut guest).await;

    send(&mut guest, &ClientMessage::RestartGame("ROOM01".into())).await;

    let restart = ServerMessage::GameRestart {
        board: EMPTY,
        current_player: Symbol::X,
    };
    assert_eq!(recv(&mut host).await, restart);
    assert_eq!(recv(&mut guest).await, restart);
}

#[tokio::test]
async fn test_restart_unknown_room_is_ignored() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::RestartGame("GHOST0".into())).await;

    assert_silent(&mut ws).await;
}

#[tokio::test]
async fn test_opponent_disconnect_notifies_remaining_player() {
    let addr = start_server().await;
    let (mut host, mut guest) = start_game(&addr).await;

    guest.close(None).await.expect("close");

    assert_eq!(recv(&mut host).await, ServerMessage::OpponentDisconnected);

    // The room survives with one seat free.
    let mut newcomer = connect(&addr).await;
    send(&mut newcomer, &ClientMessage::JoinRoom("ROOM01".into())).await;
    assert!(matches!(recv(&mut newcomer).await, ServerMessage::RoomJoined { .. }));
    assert_eq!(recv(&mut newcomer).await, ServerMessage::AssignSymbol(Symbol::O));
}

#[tokio::test]
async fn test_last_player_leaving_destroys_room() {
    let addr = start_server().await;
    let mut host = connect(&addr).await;
    send(&mut host, &ClientMessage::CreateRoom).await;
    recv(&mut host).await;

    host.close(None).await.expect("close");
    // Drain until the server drops the socket; its cleanup is queued by then.
    while let Ok(Some(Ok(_))) =
        tokio::time::timeout(Duration::from_secs(2), host.next()).await
    {}
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut late = connect(&addr).await;
    send(&mut late, &ClientMessage::JoinRoom("ROOM01".into())).await;

    assert_eq!(
        recv(&mut late).await,
        ServerMessage::Error {
            message: "room ROOM01 not found".into()
        }
    );
}

#[tokio::test]
async fn test_undecodable_frames_are_skipped() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send_raw(&mut ws, "not json").await;
    send_raw(&mut ws, r#"{"event":"checkRoomFromUrl","data":"ROOM01"}"#).await;
    send(&mut ws, &ClientMessage::CreateRoom).await;

    assert!(matches!(recv(&mut ws).await, ServerMessage::RoomCreated { .. }));
}

#[tokio::test]
async fn test_server_frames_are_text() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(&mut ws, &ClientMessage::CreateRoom).await;

    let frame = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out")
        .expect("stream ended")
        .expect("websocket error");
    let Message::Text(text) = frame else {
        panic!("expected text frame, got {frame:?}");
    };
    let value: serde_json::Value =
        serde_json::from_str(text.as_str()).expect("json");
    assert_eq!(value["event"], "roomCreated");
    assert_eq!(value["data"]["roomId"], "ROOM01");
}

#[tokio::test]
async fn test_idle_tcp_client_does_not_block_other_players() {
    let addr = start_server().await;

    // Connects but never sends the WebSocket upgrade.
    let _idle = tokio::net::TcpStream::connect(&addr)
        .await
        .expect("tcp connect");

    let mut ws = tokio::time::timeout(Duration::from_secs(3), connect(&addr))
        .await
        .expect("handshake should not wait on the idle socket");

    send(&mut ws, &ClientMessage::CreateRoom).await;
    assert!(matches!(recv(&mut ws).await, ServerMessage::RoomCreated { .. }));
}
