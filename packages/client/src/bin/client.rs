//! Kaiwa chat client.
//!
//! Lists your rooms through the chat API, opens a WebSocket to the selected
//! room and lets you chat from the terminal. Type `/help` for commands.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-client -- --username alice --token alice
//! KAIWA_API_URL=http://127.0.0.1:8080 cargo run --bin kaiwa-client -- -u bob
//! ```

use std::sync::Arc;

use clap::Parser;

use kaiwa_client::{
    connection::{WebSocketConfig, WebSocketConnector},
    directory::{DirectoryConfig, HttpRoomDirectory},
    session::{SessionConfig, SessionDeps, SessionHandle},
    ui::run_repl,
};
use kaiwa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kaiwa-client")]
#[command(about = "Realtime chat client with room management", long_about = None)]
struct Args {
    /// Name shown in the prompt and used in the WebSocket path
    #[arg(short = 'u', long, env = "KAIWA_USERNAME")]
    username: String,

    /// Base URL of the room API
    #[arg(long, env = "KAIWA_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// Base URL of the chat WebSocket endpoint
    #[arg(long, env = "KAIWA_WS_URL", default_value = "ws://127.0.0.1:8080")]
    ws_url: String,

    /// Bearer token sent with every API request (defaults to the username)
    #[arg(short = 't', long, env = "KAIWA_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let directory = HttpRoomDirectory::new(DirectoryConfig::for_user(
        args.api_url,
        &args.username,
        args.token,
    ));
    let connector = WebSocketConnector::new(WebSocketConfig::new(args.ws_url, &args.username));
    let session = SessionHandle::spawn(
        SessionDeps::new(Arc::new(directory), Arc::new(connector)),
        SessionConfig::default(),
    );

    run_repl(session, args.username).await;
}
