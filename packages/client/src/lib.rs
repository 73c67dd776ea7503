//! CLI signaling client for the Tsunagi relay.
//!
//! Joins a room under a role, sends chat/editor/negotiation frames from a
//! line-based prompt, and prints the frames the relay delivers.

pub mod error;
pub mod formatter;
pub mod input;
pub mod runner;
pub mod session;
pub mod ui;
