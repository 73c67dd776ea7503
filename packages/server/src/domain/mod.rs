//! Domain layer: room state, connection identity, and the outbound push seam.

pub mod connection;
pub mod pusher;
pub mod registry;
pub mod room;

pub use connection::ConnectionId;
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::{RoomRegistry, SharedRoomRegistry};
pub use room::{Room, RoomId};

// The role enum is part of the wire protocol but doubles as the domain
// vocabulary for room slots.
pub use tsunagi_shared::protocol::PeerRole;
