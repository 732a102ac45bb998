//! Outbound channels for every live connection.

use std::collections::HashMap;

use tictac_protocol::{Recipient, ServerMessage};
use tictac_room::RoomRegistry;
use tictac_transport::ConnectionId;
use tokio::sync::mpsc;

/// Sending half of a connection's outbound queue.
pub type OutboundSender = mpsc::UnboundedSender<ServerMessage>;

/// Receiving half, drained by the connection's own task.
pub type OutboundReceiver = mpsc::UnboundedReceiver<ServerMessage>;

/// Maps each live connection to its outbound queue.
///
/// Delivery never blocks: messages queue up and the connection task
/// writes them to the socket in order.
#[derive(Debug, Default)]
pub struct ConnectionHub {
    senders: HashMap<ConnectionId, OutboundSender>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a queue for `conn`, replacing any previous one.
    pub fn register(&mut self, conn: ConnectionId) -> OutboundReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.insert(conn, tx);
        rx
    }

    pub fn unregister(&mut self, conn: ConnectionId) {
        self.senders.remove(&conn);
    }

    /// Queues `msg` for `conn`. Returns `false` if the connection is gone.
    pub fn send_to(&self, conn: ConnectionId, msg: ServerMessage) -> bool {
        match self.senders.get(&conn) {
            Some(sender) => sender.send(msg).is_ok(),
            None => {
                tracing::debug!(conn_id = %conn, "dropping message for unknown connection");
                false
            }
        }
    }

    /// Sends each message to its recipient. A room recipient is resolved
    /// against `registry` at the moment of delivery.
    pub fn deliver(
        &self,
        registry: &RoomRegistry,
        outbound: Vec<(Recipient, ServerMessage)>,
    ) {
        for (recipient, msg) in outbound {
            match recipient {
                Recipient::Connection(conn) => {
                    self.send_to(conn, msg);
                }
                Recipient::Room(code) => {
                    for conn in registry.members(&code) {
                        self.send_to(conn, msg.clone());
                    }
                }
            }
        }
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
