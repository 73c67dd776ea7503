//! UseCase layer: the session-routing state machine.
//!
//! One usecase per connection event kind. Each locks the shared room registry
//! exactly once, runs the whole transition, releases the lock, then performs
//! the outbound pushes. Pushes are fire-and-forget: a failed delivery is
//! logged and dropped, never retried.

use std::sync::Arc;

use tsunagi_shared::protocol::ServerMessage;

use crate::domain::{ConnectionId, MessagePusher};

pub mod disconnect_peer;
pub mod error;
pub mod join_room;
pub mod relay_message;
pub mod terminate_room;

pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::JoinRoomError;
pub use join_room::JoinRoomUseCase;
pub use relay_message::RelayMessageUseCase;
pub use terminate_room::TerminateRoomUseCase;

/// Serialize `message` and push it to `target`, swallowing delivery failures.
pub(crate) async fn deliver(
    pusher: &Arc<dyn MessagePusher>,
    target: ConnectionId,
    message: &ServerMessage,
) {
    match serde_json::to_string(message) {
        Ok(json) => {
            if let Err(e) = pusher.push_to(&target, &json).await {
                tracing::warn!(
                    "Failed to push '{}' frame to connection '{}': {}",
                    message.kind(),
                    target,
                    e
                );
            }
        }
        Err(e) => tracing::error!("Failed to serialize outbound frame: {}", e),
    }
}
