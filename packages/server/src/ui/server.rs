//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::{MessagePusher, SharedRoomRegistry};
use crate::usecase::{
    DisconnectPeerUseCase, JoinRoomUseCase, RelayMessageUseCase, TerminateRoomUseCase,
};

use super::{
    handler::{
        http::{get_rooms, health_check, root},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket signaling relay server
///
/// Encapsulates the wired-up routing usecases and runs the axum application
/// around them.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     registry,
///     message_pusher,
///     join_room_usecase,
///     relay_message_usecase,
///     terminate_room_usecase,
///     disconnect_peer_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    registry: SharedRoomRegistry,
    message_pusher: Arc<dyn MessagePusher>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    relay_message_usecase: Arc<RelayMessageUseCase>,
    terminate_room_usecase: Arc<TerminateRoomUseCase>,
    disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
}

impl Server {
    pub fn new(
        registry: SharedRoomRegistry,
        message_pusher: Arc<dyn MessagePusher>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        terminate_room_usecase: Arc<TerminateRoomUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            join_room_usecase,
            relay_message_usecase,
            terminate_room_usecase,
            disconnect_peer_usecase,
        }
    }

    /// Bind `host:port` and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener.
    ///
    /// Split out of [`Server::run`] so tests can bind an ephemeral port and
    /// learn its address before starting the server.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app_state = Arc::new(AppState {
            registry: self.registry,
            message_pusher: self.message_pusher,
            join_room_usecase: self.join_room_usecase,
            relay_message_usecase: self.relay_message_usecase,
            terminate_room_usecase: self.terminate_room_usecase,
            disconnect_peer_usecase: self.disconnect_peer_usecase,
        });

        // Define handlers
        let app = Router::new()
            // liveness page, kept for compatibility with load balancer checks
            .route("/", get(root))
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let local_addr = listener.local_addr()?;
        tracing::info!("Signaling relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
