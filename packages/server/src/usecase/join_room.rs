//! UseCase: join a room under a role.
//!
//! The room is created on first reference. Role assignment is asymmetric:
//! the sender slot is first-come-first-served and a conflicting claim gets an
//! `error` reply, while the receiver slot is overwritten unconditionally so
//! the last joining receiver wins.

use std::sync::Arc;

use tsunagi_shared::protocol::{PeerRole, ROOM_OCCUPIED_MESSAGE, ServerMessage};

use crate::domain::{ConnectionId, MessagePusher, RoomId, SharedRoomRegistry};

use super::{JoinRoomError, deliver};

/// UseCase for joining a room.
pub struct JoinRoomUseCase {
    registry: SharedRoomRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(registry: SharedRoomRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Apply a `joinRoom` frame from `conn`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the role slot now holds `conn`
    /// * `Err(JoinRoomError::RoomOccupied)` - sender slot conflict; the error
    ///   reply has already been pushed to the joiner
    pub async fn execute(
        &self,
        conn: ConnectionId,
        room_id: RoomId,
        role: PeerRole,
    ) -> Result<(), JoinRoomError> {
        let rejected = {
            let mut registry = self.registry.lock().await;
            let room = registry.get_or_create(&room_id);
            match role {
                PeerRole::Sender => !room.claim_sender(conn),
                PeerRole::Receiver => {
                    room.set_receiver(conn);
                    false
                }
            }
        };

        if rejected {
            deliver(
                &self.message_pusher,
                conn,
                &ServerMessage::Error {
                    message: ROOM_OCCUPIED_MESSAGE.to_string(),
                },
            )
            .await;
            return Err(JoinRoomError::RoomOccupied(room_id));
        }

        tracing::info!("Connection '{}' joined room '{}' as {}", conn, room_id, role);
        Ok(())
    }
}
