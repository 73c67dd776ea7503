//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::infrastructure::dto::http::RoomSummaryDto;
use crate::ui::state::AppState;

/// Plain-text liveness page at the root.
pub async fn root() -> &'static str {
    "Tsunagi signaling relay is running"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug listing of live rooms and their slot occupancy.
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let registry = state.registry.lock().await;

    let room_summaries: Vec<RoomSummaryDto> = registry
        .rooms()
        .map(|(room_id, room)| RoomSummaryDto {
            id: room_id.as_str().to_string(),
            has_sender: room.sender().is_some(),
            has_receiver: room.receiver().is_some(),
        })
        .collect();

    Json(room_summaries)
}
