//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{MessagePusher, SharedRoomRegistry};
use crate::usecase::{
    DisconnectPeerUseCase, JoinRoomUseCase, RelayMessageUseCase, TerminateRoomUseCase,
};

/// Shared application state
pub struct AppState {
    /// Room registry, exposed read-only to the HTTP debug listing
    pub registry: SharedRoomRegistry,
    /// MessagePusher, for registering accepted connections
    pub message_pusher: Arc<dyn MessagePusher>,
    /// UseCase for the `joinRoom` frame
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// UseCase for relayable frames
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// UseCase for the `terminateRoom` frame
    pub terminate_room_usecase: Arc<TerminateRoomUseCase>,
    /// UseCase for connection closure
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
}
