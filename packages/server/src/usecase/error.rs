//! Error types for the routing usecases.
//!
//! Only the role conflict is surfaced as an error; every other degenerate
//! input (absent room, absent peer, unrelated connection) is a silent no-op
//! by contract.

use thiserror::Error;

use crate::domain::RoomId;

/// Errors raised while joining a room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// The sender slot of the room is already taken.
    #[error("room '{0}' already has a sender")]
    RoomOccupied(RoomId),
}
