//! UseCase: explicit room termination.
//!
//! Termination is receiver-authoritative: whatever connection invokes it, the
//! room is only removed when that connection currently holds the receiver
//! slot. A sender asking to terminate is a no-op and the room persists. This
//! asymmetry is load-bearing (the receiver is the host) and must not be
//! evened out.

use std::sync::Arc;

use tsunagi_shared::protocol::{PeerRole, ServerMessage};

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry, SharedRoomRegistry};

use super::deliver;

/// Remove the room if `conn` is its current receiver.
///
/// Returns the outcome: whether the room was removed, and the sender to
/// notify with `MeetingEnded` when one was present.
pub(crate) fn cleanup_room(
    registry: &mut RoomRegistry,
    room_id: &RoomId,
    conn: ConnectionId,
) -> CleanupOutcome {
    let Some(room) = registry.get(room_id) else {
        return CleanupOutcome::default();
    };
    if room.receiver() != Some(conn) {
        return CleanupOutcome::default();
    }

    let notify_sender = room.sender();
    registry.remove(room_id);
    CleanupOutcome {
        removed: true,
        notify_sender,
    }
}

/// Result of a [`cleanup_room`] attempt.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CleanupOutcome {
    pub removed: bool,
    pub notify_sender: Option<ConnectionId>,
}

/// UseCase for the `terminateRoom` frame.
pub struct TerminateRoomUseCase {
    registry: SharedRoomRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TerminateRoomUseCase {
    pub fn new(registry: SharedRoomRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Apply a `terminateRoom` frame from `conn` declaring `role`.
    ///
    /// The declared role must match the slot `conn` actually holds; a
    /// mismatch is dropped outright. Returns whether the room was removed.
    pub async fn execute(&self, conn: ConnectionId, room_id: RoomId, role: PeerRole) -> bool {
        let outcome = {
            let mut registry = self.registry.lock().await;
            let authorized = registry
                .get(&room_id)
                .is_some_and(|room| room.role_of(conn) == Some(role));
            if !authorized {
                tracing::debug!(
                    "Dropping terminateRoom for room '{}': connection '{}' does not hold the declared {} role",
                    room_id,
                    conn,
                    role
                );
                return false;
            }
            cleanup_room(&mut registry, &room_id, conn)
        };

        if let Some(sender) = outcome.notify_sender {
            deliver(
                &self.message_pusher,
                sender,
                &ServerMessage::MeetingEnded {
                    role: PeerRole::Sender,
                },
            )
            .await;
        }

        if outcome.removed {
            tracing::info!("Room '{}' has been terminated and cleaned up", room_id);
        }
        outcome.removed
    }
}
