//! WebSocket-backed MessagePusher implementation.
//!
//! The UI layer creates one unbounded channel per accepted connection and
//! registers the write half here; a pusher task drains the read half into the
//! actual socket. This implementation only manages the registered senders and
//! pushes frames into them; it never touches the sockets themselves.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// MessagePusher backed by the per-connection WebSocket write channels.
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher {
    /// Write channels of the currently connected peers.
    peers: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// Create a pusher with no registered peers.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_peer(&self, conn: ConnectionId, sender: PusherChannel) {
        let mut peers = self.peers.lock().await;
        peers.insert(conn, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", conn);
    }

    async fn unregister_peer(&self, conn: &ConnectionId) {
        let mut peers = self.peers.lock().await;
        peers.remove(conn);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", conn);
    }

    async fn push_to(&self, conn: &ConnectionId, content: &str) -> Result<(), MessagePushError> {
        let peers = self.peers.lock().await;

        let Some(sender) = peers.get(conn) else {
            return Err(MessagePushError::PeerNotFound(conn.to_string()));
        };
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed frame to connection '{}'", conn);
        Ok(())
    }

    async fn is_open(&self, conn: &ConnectionId) -> bool {
        let peers = self.peers.lock().await;
        peers.get(conn).is_some_and(|sender| !sender.is_closed())
    }
}
