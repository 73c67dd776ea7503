//! UseCase: connection-closed handling.
//!
//! The departure policy is asymmetric on purpose:
//!
//! - a departing **receiver** ends the meeting: the sender (if still open)
//!   is told `MeetingEnded {role: receiver}`, then cleanup removes the room
//!   and additionally notifies the sender with `MeetingEnded {role: sender}`
//! - a departing **sender** only vacates its slot: the receiver (if open)
//!   gets `participantLeft {role: sender}` and the room persists so a new
//!   sender can join later
//!
//! A room left with both slots vacant is dropped rather than kept as an
//! empty placeholder.

use std::sync::Arc;

use tsunagi_shared::protocol::{PeerRole, ServerMessage};

use crate::domain::{ConnectionId, MessagePusher, RoomId, SharedRoomRegistry};

use super::deliver;
use super::terminate_room::cleanup_room;

/// Notifications owed to the remaining peer after a departure.
#[derive(Debug, Default)]
struct DeparturePlan {
    /// Sent only when the target channel is still open.
    gated: Option<(ConnectionId, ServerMessage)>,
    /// Sent regardless of channel state.
    ungated: Option<(ConnectionId, ServerMessage)>,
}

/// UseCase for transport-level connection closure.
pub struct DisconnectPeerUseCase {
    registry: SharedRoomRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPeerUseCase {
    pub fn new(registry: SharedRoomRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Apply the closure of `conn`.
    ///
    /// The whole room transition runs under one registry lock; only the
    /// resulting notifications go out after it is released.
    ///
    /// # Returns
    ///
    /// The room and role the connection occupied, or `None` when it was not
    /// a member of any room.
    pub async fn execute(&self, conn: ConnectionId) -> Option<(RoomId, PeerRole)> {
        let (room_id, role, plan) = {
            let mut registry = self.registry.lock().await;
            // A connection occupies at most one role in at most one room, so
            // the first match is the only match.
            let (room_id, role) = registry.find_membership(conn)?;

            let mut plan = DeparturePlan::default();
            match role {
                PeerRole::Receiver => {
                    let sender = registry.get(&room_id).and_then(|room| room.sender());
                    let outcome = cleanup_room(&mut registry, &room_id, conn);

                    // Pre-cleanup notice, gated on the sender channel being open.
                    plan.gated = sender.map(|sender| {
                        (
                            sender,
                            ServerMessage::MeetingEnded {
                                role: PeerRole::Receiver,
                            },
                        )
                    });
                    // Cleanup's own notice is unconditional on channel state.
                    plan.ungated = outcome.notify_sender.map(|sender| {
                        (
                            sender,
                            ServerMessage::MeetingEnded {
                                role: PeerRole::Sender,
                            },
                        )
                    });
                    tracing::info!("Receiver disconnected; room '{}' removed", room_id);
                }
                PeerRole::Sender => {
                    let (receiver, now_empty) = {
                        let room = registry.get_mut(&room_id)?;
                        let receiver = room.receiver();
                        room.clear_sender();
                        (receiver, room.is_empty())
                    };
                    // Lone senders leave a dead room behind; drop it.
                    if now_empty {
                        registry.remove(&room_id);
                    }

                    plan.gated = receiver.map(|receiver| {
                        (
                            receiver,
                            ServerMessage::ParticipantLeft {
                                role: PeerRole::Sender,
                            },
                        )
                    });
                    tracing::info!("Sender disconnected from room '{}'", room_id);
                }
            }
            (room_id, role, plan)
        };

        if let Some((target, message)) = plan.gated
            && self.message_pusher.is_open(&target).await
        {
            deliver(&self.message_pusher, target, &message).await;
        }
        if let Some((target, message)) = plan.ungated {
            deliver(&self.message_pusher, target, &message).await;
        }

        Some((room_id, role))
    }
}
