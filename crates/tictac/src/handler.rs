//! Per-connection handler: decode, route, deliver.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register an outbound queue in the hub
//!   2. Loop: wait for either an inbound frame or a queued outbound message
//!   3. Inbound frames are decoded and applied to the registry; the
//!      replies go through the hub, including those for this connection
//!   4. On exit the connection leaves its room

use std::sync::Arc;

use tictac_protocol::{ClientMessage, Codec};
use tictac_transport::{Connection, ConnectionId, WebSocketConnection};

use crate::router::{self, Outbound};
use crate::server::ServerState;
use crate::TictacError;

/// Drop guard that takes a connection out of the hub and its room when
/// the handler exits.
///
/// Runs even if the handler returns early with an error. Since `Drop`
/// is synchronous, we spawn a fire-and-forget task for the async locks.
struct ConnectionGuard {
    conn_id: ConnectionId,
    state: Arc<ServerState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut registry = state.registry.lock().await;
            let outbound = router::handle_disconnect(&mut registry, conn_id);
            let mut hub = state.hub.lock().await;
            hub.unregister(conn_id);
            hub.deliver(&registry, outbound);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), TictacError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let mut outbox = state.hub.lock().await.register(conn_id);
    let _guard = ConnectionGuard {
        conn_id,
        state: Arc::clone(&state),
    };

    loop {
        tokio::select! {
            inbound = conn.recv() => {
                let data = match inbound {
                    Ok(Some(data)) => data,
                    Ok(None) => {
                        tracing::info!(%conn_id, "connection closed");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "recv error");
                        return Err(e.into());
                    }
                };

                let msg: ClientMessage = match state.codec.decode(&data) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "failed to decode message");
                        continue;
                    }
                };

                dispatch(&state, conn_id, msg).await;
            }
            Some(msg) = outbox.recv() => {
                let bytes = state.codec.encode(&msg)?;
                conn.send(&bytes).await?;
            }
        }
    }

    // _guard drops here → disconnect cleanup fires.
    Ok(())
}

/// Applies one client message and queues the replies.
///
/// The registry lock is held until every reply is queued, so messages
/// from consecutive operations reach each recipient in order.
async fn dispatch(state: &ServerState, conn_id: ConnectionId, msg: ClientMessage) {
    let mut registry = state.registry.lock().await;
    let outbound: Outbound =
        router::handle_message(&mut registry, &state.config, conn_id, msg);
    state.hub.lock().await.deliver(&registry, outbound);
}
