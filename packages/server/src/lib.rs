//! Tsunagi signaling relay server library.
//!
//! The relay pairs a "sender" and a "receiver" inside a client-named room and
//! forwards negotiation payloads (offers, answers, ICE candidates) and
//! side-channel frames (chat, editor content) between them without inspecting
//! their content.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
