//! Concrete [`MessagePusher`](crate::domain::MessagePusher) implementations.
//!
//! - `websocket`: backed by the per-connection WebSocket write channels

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
