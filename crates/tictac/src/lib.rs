//! # Tictac
//!
//! Two-player tic-tac-toe over WebSocket.
//!
//! The server holds every room and board; browsers create or join a
//! room by its six-character code and receive board and turn updates as
//! the game goes on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tictac::prelude::*;
//!
//! # async fn start() -> Result<(), TictacError> {
//! let server = TictacServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod hub;
mod router;
mod server;

pub use config::ServerConfig;
pub use error::TictacError;
pub use hub::{ConnectionHub, OutboundReceiver, OutboundSender};
pub use server::{TictacServer, TictacServerBuilder};

pub use tictac_protocol as protocol;
pub use tictac_room as room;
pub use tictac_transport as transport;

/// Everything needed to start a server and talk about its messages.
pub mod prelude {
    pub use crate::{ServerConfig, TictacError, TictacServer, TictacServerBuilder};
    pub use tictac_protocol::{
        ClientMessage, MoveRequest, Recipient, RoomCode, ServerMessage, Symbol,
        Winner,
    };
    pub use tictac_room::{CodeSource, RoomError, RoomStatus};
    pub use tictac_transport::ConnectionId;
}
