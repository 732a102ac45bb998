//! `TictacServer` builder and server loop.
//!
//! This is the entry point for running a Tictac server. It ties the
//! layers together: transport → protocol → rooms.

use std::net::SocketAddr;
use std::sync::Arc;

use tictac_protocol::JsonCodec;
use tictac_room::{CodeSource, RoomRegistry};
use tictac_transport::{Handshake, Transport, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::hub::ConnectionHub;
use crate::{ServerConfig, TictacError};

/// Shared server state passed to each connection handler task.
///
/// Lock order is `registry` then `hub`; code that needs both takes them
/// in that order.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) hub: Mutex<ConnectionHub>,
    pub(crate) config: ServerConfig,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Tictac server.
///
/// # Example
///
/// ```rust,no_run
/// use tictac::prelude::*;
///
/// # async fn start() -> Result<(), TictacError> {
/// let server = TictacServer::builder()
///     .bind("0.0.0.0:3000")
///     .public_url("https://tictac.example.com")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct TictacServerBuilder {
    config: ServerConfig,
    code_source: Option<CodeSource>,
}

impl TictacServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            code_source: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the base URL used in game links.
    pub fn public_url(mut self, url: &str) -> Self {
        self.config.public_url = url.to_string();
        self
    }

    /// Draws room codes from `source` instead of at random.
    pub fn code_source(mut self, source: CodeSource) -> Self {
        self.code_source = Some(source);
        self
    }

    /// Binds the listener and prepares the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<TictacServer, TictacError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let registry = match self.code_source {
            Some(source) => RoomRegistry::with_code_source(source),
            None => RoomRegistry::new(),
        };

        let state = Arc::new(ServerState {
            registry: Mutex::new(registry),
            hub: Mutex::new(ConnectionHub::new()),
            config: self.config,
            codec: JsonCodec,
        });

        Ok(TictacServer { transport, state })
    }
}

impl Default for TictacServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Tictac server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TictacServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl TictacServer {
    /// Creates a new builder.
    pub fn builder() -> TictacServerBuilder {
        TictacServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, TictacError> {
        Ok(self.transport.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Runs the server accept loop.
    ///
    /// Spawns a task per accepted socket that completes the WebSocket
    /// handshake and then runs the handler. Runs until the process is
    /// terminated.
    pub async fn run(mut self) -> Result<(), TictacError> {
        tracing::info!(
            bind_addr = %self.state.config.bind_addr,
            public_url = %self.state.config.public_url,
            "tictac server running"
        );

        loop {
            match self.transport.accept().await {
                Ok(pending) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let peer = pending.peer_addr();
                        let conn = match pending.complete().await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%peer, error = %e, "handshake failed");
                                return;
                            }
                        };
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
