//! Shared building blocks for the Tsunagi signaling relay.
//!
//! This crate holds the pieces used by both the server and the CLI client:
//! the wire protocol types and the logging bootstrap.

pub mod logger;
pub mod protocol;
