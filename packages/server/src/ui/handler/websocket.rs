//! WebSocket connection handlers.
//!
//! One accepted socket becomes: a fresh [`ConnectionId`], an unbounded
//! channel registered with the pusher, a task draining that channel into the
//! socket, and a receive loop decoding each text frame once into a
//! [`ClientMessage`] and dispatching it to the routing usecases.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use tsunagi_shared::protocol::ClientMessage;

use crate::domain::{ConnectionId, RoomId};
use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the rx channel into the WebSocket sender.
///
/// This is the outbound half: frames the routing layer pushes for this
/// connection end up here and get written to the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn = ConnectionId::new();
    tracing::info!("WebSocket connection accepted: '{}'", conn);

    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    state.message_pusher.register_peer(conn, tx).await;

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", conn, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_frame(&state_clone, conn, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", conn);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", conn);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Some((room_id, role)) = state.disconnect_peer_usecase.execute(conn).await {
        tracing::info!(
            "Connection '{}' left room '{}' where it held the {} role",
            conn,
            room_id,
            role
        );
    }
    state.message_pusher.unregister_peer(&conn).await;
    tracing::info!("WebSocket connection closed: '{}'", conn);
}

/// Decode one text frame and hand it to the matching usecase.
///
/// Malformed JSON is dropped per-frame: the connection stays up and no other
/// room is affected.
async fn dispatch_frame(state: &Arc<AppState>, conn: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::JoinRoom { room_id, role }) => {
            if let Err(e) = state
                .join_room_usecase
                .execute(conn, RoomId::from(room_id), role)
                .await
            {
                tracing::warn!("Join rejected for connection '{}': {}", conn, e);
            }
        }
        Ok(ClientMessage::TerminateRoom { room_id, role }) => {
            state
                .terminate_room_usecase
                .execute(conn, RoomId::from(room_id), role)
                .await;
        }
        Ok(ClientMessage::Unknown) => {
            tracing::debug!("Dropping frame with unknown type from '{}'", conn);
        }
        Ok(relayable) => {
            state.relay_message_usecase.execute(conn, relayable).await;
        }
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", conn, e);
        }
    }
}
