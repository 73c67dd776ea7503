//! UseCase: forward a negotiation or side-channel frame to the right peer.
//!
//! Routing is best-effort: when the room, the target slot, or the submitter's
//! membership is missing, the frame is dropped without a reply. The sending
//! client is responsible for its own liveness assumptions.
//!
//! Per-kind routing rules:
//!
//! - `createOffer` / `createAnswer` go to the receiver / sender slot without
//!   checking who submitted them
//! - `iceCandidate` / `chatMessage` flow between the two endpoints only, in
//!   either direction
//! - `editorContent` flows sender → receiver exclusively

use std::sync::Arc;

use tsunagi_shared::protocol::{ClientMessage, ServerMessage};

use crate::domain::{ConnectionId, MessagePusher, Room, RoomId, SharedRoomRegistry};

use super::deliver;

/// How the forwarded frame picks its target inside the room.
enum Route {
    /// Deliver to the receiver slot, whoever submitted the frame.
    ToReceiver,
    /// Deliver to the sender slot, whoever submitted the frame.
    ToSender,
    /// Deliver to the endpoint opposite the submitter.
    ToOpposite,
    /// Deliver to the receiver, but only when the submitter is the sender.
    SenderToReceiver,
}

impl Route {
    fn target(&self, room: &Room, from: ConnectionId) -> Option<ConnectionId> {
        match self {
            Route::ToReceiver => room.receiver(),
            Route::ToSender => room.sender(),
            Route::ToOpposite => room.peer_of(from),
            Route::SenderToReceiver => {
                if room.sender() == Some(from) {
                    room.receiver()
                } else {
                    None
                }
            }
        }
    }
}

/// UseCase for forwarding relayable frames.
pub struct RelayMessageUseCase {
    registry: SharedRoomRegistry,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayMessageUseCase {
    pub fn new(registry: SharedRoomRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Forward `message` submitted by `conn`.
    ///
    /// # Returns
    ///
    /// The connection the frame was delivered to, or `None` when the frame
    /// was dropped (absent room/peer, unrelated submitter, or a non-relayable
    /// message kind).
    pub async fn execute(&self, conn: ConnectionId, message: ClientMessage) -> Option<ConnectionId> {
        let (room_id, route, outbound) = match message {
            ClientMessage::CreateOffer { room_id, sdp, r_link } => (
                room_id,
                Route::ToReceiver,
                ServerMessage::CreateOffer { sdp, r_link },
            ),
            ClientMessage::CreateAnswer { room_id, sdp } => {
                (room_id, Route::ToSender, ServerMessage::CreateAnswer { sdp })
            }
            ClientMessage::IceCandidate { room_id, candidate } => (
                room_id,
                Route::ToOpposite,
                ServerMessage::IceCandidate { candidate },
            ),
            ClientMessage::ChatMessage { room_id, text } => (
                room_id,
                Route::ToOpposite,
                ServerMessage::ChatMessage { text },
            ),
            ClientMessage::EditorContent { room_id, content } => (
                room_id,
                Route::SenderToReceiver,
                ServerMessage::EditorContent { content },
            ),
            // joinRoom / terminateRoom / unknown frames are not relayable.
            _ => return None,
        };

        let room_id = RoomId::from(room_id);
        let target = {
            let registry = self.registry.lock().await;
            let Some(room) = registry.get(&room_id) else {
                tracing::debug!(
                    "Dropping '{}' frame for unknown room '{}'",
                    outbound.kind(),
                    room_id
                );
                return None;
            };
            route.target(room, conn)
        };

        let Some(target) = target else {
            tracing::debug!(
                "Dropping '{}' frame in room '{}': no eligible peer",
                outbound.kind(),
                room_id
            );
            return None;
        };

        deliver(&self.message_pusher, target, &outbound).await;
        tracing::debug!(
            "Forwarded '{}' frame in room '{}' to connection '{}'",
            outbound.kind(),
            room_id,
            target
        );
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::testing::{RecordingPusher, empty_registry};

    struct Fixture {
        usecase: RelayMessageUseCase,
        pusher: Arc<RecordingPusher>,
        sender: ConnectionId,
        receiver: ConnectionId,
    }

    /// Room "r1" with both slots occupied.
    async fn create_paired_room() -> Fixture {
        let registry = empty_registry();
        let pusher = Arc::new(RecordingPusher::new());
        let sender = ConnectionId::new();
        let receiver = ConnectionId::new();
        {
            let mut registry = registry.lock().await;
            let room = registry.get_or_create(&RoomId::from("r1"));
            room.claim_sender(sender);
            room.set_receiver(receiver);
        }
        let usecase = RelayMessageUseCase::new(registry, pusher.clone());
        Fixture {
            usecase,
            pusher,
            sender,
            receiver,
        }
    }

    #[tokio::test]
    async fn test_offer_is_forwarded_to_receiver_only() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f
            .usecase
            .execute(
                f.sender,
                ClientMessage::CreateOffer {
                    room_id: "r1".to_string(),
                    sdp: "X".to_string(),
                    r_link: "L".to_string(),
                },
            )
            .await;

        // then: exactly one frame, to the receiver, with roomId stripped
        assert_eq!(target, Some(f.receiver));
        let pushed = f.pusher.pushed().await;
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].0, f.receiver);
        assert_eq!(
            pushed[0].1,
            ServerMessage::CreateOffer {
                sdp: "X".to_string(),
                r_link: "L".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_offer_without_receiver_is_dropped() {
        // given: a room with only a sender
        let registry = empty_registry();
        let pusher = Arc::new(RecordingPusher::new());
        let sender = ConnectionId::new();
        registry
            .lock()
            .await
            .get_or_create(&RoomId::from("r1"))
            .claim_sender(sender);
        let usecase = RelayMessageUseCase::new(registry, pusher.clone());

        // when:
        let target = usecase
            .execute(
                sender,
                ClientMessage::CreateOffer {
                    room_id: "r1".to_string(),
                    sdp: "X".to_string(),
                    r_link: "L".to_string(),
                },
            )
            .await;

        // then: silent no-op
        assert_eq!(target, None);
        assert!(pusher.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn test_offer_is_forwarded_regardless_of_submitter() {
        // given:
        let f = create_paired_room().await;
        let stranger = ConnectionId::new();

        // when: offers carry no submitter check, only a target slot
        let target = f
            .usecase
            .execute(
                stranger,
                ClientMessage::CreateOffer {
                    room_id: "r1".to_string(),
                    sdp: "X".to_string(),
                    r_link: String::new(),
                },
            )
            .await;

        // then:
        assert_eq!(target, Some(f.receiver));
    }

    #[tokio::test]
    async fn test_frame_for_unknown_room_is_dropped() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f
            .usecase
            .execute(
                f.sender,
                ClientMessage::ChatMessage {
                    room_id: "no-such-room".to_string(),
                    text: "hello".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, None);
        assert!(f.pusher.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_forwarded_to_sender() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f
            .usecase
            .execute(
                f.receiver,
                ClientMessage::CreateAnswer {
                    room_id: "r1".to_string(),
                    sdp: "Y".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, Some(f.sender));
        let pushed = f.pusher.pushed().await;
        assert_eq!(pushed.len(), 1);
        assert_eq!(
            pushed[0].1,
            ServerMessage::CreateAnswer {
                sdp: "Y".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_ice_candidate_flows_both_directions() {
        // given:
        let f = create_paired_room().await;

        // when: the sender submits a candidate
        let to_receiver = f
            .usecase
            .execute(
                f.sender,
                ClientMessage::IceCandidate {
                    room_id: "r1".to_string(),
                    candidate: "c1".to_string(),
                },
            )
            .await;

        // and the receiver submits one back
        let to_sender = f
            .usecase
            .execute(
                f.receiver,
                ClientMessage::IceCandidate {
                    room_id: "r1".to_string(),
                    candidate: "c2".to_string(),
                },
            )
            .await;

        // then: each lands on the opposite endpoint
        assert_eq!(to_receiver, Some(f.receiver));
        assert_eq!(to_sender, Some(f.sender));
        let pushed = f.pusher.pushed().await;
        assert_eq!(pushed.len(), 2);
        assert_eq!(
            pushed[0],
            (
                f.receiver,
                ServerMessage::IceCandidate {
                    candidate: "c1".to_string()
                }
            )
        );
        assert_eq!(
            pushed[1],
            (
                f.sender,
                ServerMessage::IceCandidate {
                    candidate: "c2".to_string()
                }
            )
        );
    }

    #[tokio::test]
    async fn test_ice_candidate_from_unrelated_connection_is_dropped() {
        // given:
        let f = create_paired_room().await;
        let stranger = ConnectionId::new();

        // when: a connection holding no slot names the same room
        let target = f
            .usecase
            .execute(
                stranger,
                ClientMessage::IceCandidate {
                    room_id: "r1".to_string(),
                    candidate: "c1".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, None);
        assert!(f.pusher.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn test_chat_message_flows_between_endpoints() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f
            .usecase
            .execute(
                f.receiver,
                ClientMessage::ChatMessage {
                    room_id: "r1".to_string(),
                    text: "hello".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, Some(f.sender));
        let pushed = f.pusher.pushed().await;
        assert_eq!(
            pushed[0],
            (
                f.sender,
                ServerMessage::ChatMessage {
                    text: "hello".to_string()
                }
            )
        );
    }

    #[tokio::test]
    async fn test_editor_content_flows_sender_to_receiver() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f
            .usecase
            .execute(
                f.sender,
                ClientMessage::EditorContent {
                    room_id: "r1".to_string(),
                    content: "fn main() {}".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, Some(f.receiver));
    }

    #[tokio::test]
    async fn test_editor_content_from_receiver_is_dropped() {
        // given:
        let f = create_paired_room().await;

        // when: only sender → receiver delivery is valid
        let target = f
            .usecase
            .execute(
                f.receiver,
                ClientMessage::EditorContent {
                    room_id: "r1".to_string(),
                    content: "fn main() {}".to_string(),
                },
            )
            .await;

        // then:
        assert_eq!(target, None);
        assert!(f.pusher.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_relayable_frames_are_ignored() {
        // given:
        let f = create_paired_room().await;

        // when:
        let target = f.usecase.execute(f.sender, ClientMessage::Unknown).await;

        // then:
        assert_eq!(target, None);
        assert!(f.pusher.pushed().await.is_empty());
    }
}
