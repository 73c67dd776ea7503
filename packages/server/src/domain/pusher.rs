//! MessagePusher trait definition.
//!
//! The routing layer depends on this interface for every outbound frame; the
//! concrete WebSocket-backed implementation lives in the infrastructure layer.
//! Keeping the seam here lets the routing usecases be exercised without a live
//! transport.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::ConnectionId;

/// Write half handed to the pusher when a connection registers.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Errors surfaced by the pusher.
///
/// The relay treats every push as fire-and-forget: callers log these and move
/// on, they never propagate past a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No channel is registered for the target connection.
    #[error("peer '{0}' is not registered")]
    PeerNotFound(String),

    /// The channel rejected the frame (receive side already gone).
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Outbound delivery seam between the routing layer and the transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's write channel.
    async fn register_peer(&self, conn: ConnectionId, sender: PusherChannel);

    /// Drop a connection's write channel.
    async fn unregister_peer(&self, conn: &ConnectionId);

    /// Push one serialized frame to a single connection. Best effort.
    async fn push_to(&self, conn: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// Whether the connection is registered and its channel still accepts frames.
    async fn is_open(&self, conn: &ConnectionId) -> bool;
}
