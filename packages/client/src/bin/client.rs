//! CLI signaling client for the Tsunagi relay.
//!
//! Joins a room under a role and relays prompt input to the peer. A plain
//! line is a chat message; `/offer`, `/answer`, `/ice`, `/editor` send
//! negotiation and side-channel frames; `/leave` terminates the room.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval). A rejected sender claim exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-client -- --room-id r1 --role sender
//! cargo run --bin tsunagi-client -- -r r1 --role receiver
//! ```

use clap::Parser;

use tsunagi_shared::{logger::setup_logger, protocol::PeerRole};

#[derive(Parser, Debug)]
#[command(name = "tsunagi-client")]
#[command(about = "CLI signaling client for the Tsunagi relay", long_about = None)]
struct Args {
    /// Room identifier to join (created by the relay on first reference)
    #[arg(short = 'r', long)]
    room_id: String,

    /// Role to claim in the room: sender or receiver
    #[arg(long)]
    role: PeerRole,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = tsunagi_client::runner::run_client(args.url, args.room_id, args.role).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
