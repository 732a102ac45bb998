//! `tictac-server`: runs the tic-tac-toe WebSocket server.

use clap::Parser;
use tictac::prelude::*;
use tracing_subscriber::EnvFilter;

/// Two-player tic-tac-toe server
#[derive(Debug, Parser)]
#[command(name = "tictac-server")]
#[command(about = "Hosts two-player tic-tac-toe rooms over WebSocket")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "TICTAC_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Base URL of the game page, used in shareable room links
    #[arg(long, env = "TICTAC_PUBLIC_URL", default_value = "http://localhost:3000")]
    public_url: String,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            public_url: self.public_url,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), TictacError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = TictacServer::builder()
        .config(cli.into_config())
        .build()
        .await?;

    tracing::info!(addr = %server.local_addr()?, "listening");
    server.run().await
}
