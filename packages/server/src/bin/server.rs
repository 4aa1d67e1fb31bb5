//! Kaiwa reference server.
//!
//! Serves the room directory API and an echoing chat socket per room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-server
//! cargo run --bin kaiwa-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use kaiwa_server::{
    infrastructure::{repository::InMemoryRoomRepository, responder::EchoResponder},
    ui::Server,
};
use kaiwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kaiwa-server")]
#[command(about = "Room directory and chat socket server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KAIWA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "KAIWA_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let repository = Arc::new(InMemoryRoomRepository::new());
    let responder = Arc::new(EchoResponder);

    let server = Server::new(repository, responder);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
