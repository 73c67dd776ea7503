//! WebRTC-style signaling relay server.
//!
//! Pairs a sender and a receiver per room and forwards negotiation and
//! side-channel frames between them.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-server
//! cargo run --bin tsunagi-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use tsunagi_server::{
    domain::RoomRegistry,
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{
        DisconnectPeerUseCase, JoinRoomUseCase, RelayMessageUseCase, TerminateRoomUseCase,
    },
};
use tsunagi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsunagi-server")]
#[command(about = "WebRTC-style signaling relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Room registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create the room registry behind its single coarse lock
    let registry = Arc::new(Mutex::new(RoomRegistry::new()));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let terminate_room_usecase = Arc::new(TerminateRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        registry,
        message_pusher,
        join_room_usecase,
        relay_message_usecase,
        terminate_room_usecase,
        disconnect_peer_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
