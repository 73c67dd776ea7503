//! HTTP API response DTOs.

use serde::Serialize;

/// Occupancy snapshot of one room, as returned by `GET /api/rooms`.
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub has_sender: bool,
    pub has_receiver: bool,
}
