//! Error types for the signaling client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The room's sender slot is already taken
    #[error("Room '{0}' already has a sender")]
    RoomOccupied(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
