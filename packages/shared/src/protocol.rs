//! Wire protocol for the signaling relay.
//!
//! Every frame exchanged over the WebSocket is a JSON object discriminated by
//! its `type` field. The two directions use two closed enums: [`ClientMessage`]
//! for frames submitted by participants and [`ServerMessage`] for frames the
//! relay delivers. Both are decoded/encoded exactly once at the transport
//! boundary; the routing layer only ever sees the typed variants.
//!
//! Field spellings (`roomId`, `r_link`, `MeetingEnded`, `participantLeft`) are
//! part of the protocol and must not be normalized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply sent to a connection that tries to claim an already-occupied sender slot.
pub const ROOM_OCCUPIED_MESSAGE: &str = "Room is occupied with Candidate";

/// The two roles a connection can hold inside a room.
///
/// The receiver is authoritative for room termination; the sender initiates
/// negotiation and is the only side allowed to push editor content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerRole {
    Sender,
    Receiver,
}

impl fmt::Display for PeerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerRole::Sender => write!(f, "sender"),
            PeerRole::Receiver => write!(f, "receiver"),
        }
    }
}

/// Error returned when parsing a [`PeerRole`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid peer role '{0}', expected 'sender' or 'receiver'")]
pub struct ParsePeerRoleError(String);

impl FromStr for PeerRole {
    type Err = ParsePeerRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sender" => Ok(PeerRole::Sender),
            "receiver" => Ok(PeerRole::Receiver),
            other => Err(ParsePeerRoleError(other.to_string())),
        }
    }
}

/// Frames submitted by a participant.
///
/// Unrecognized `type` values decode to [`ClientMessage::Unknown`] so the
/// dispatch layer can drop them explicitly instead of failing the whole frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "joinRoom")]
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: String,
        role: PeerRole,
    },
    #[serde(rename = "createOffer")]
    CreateOffer {
        #[serde(rename = "roomId")]
        room_id: String,
        sdp: String,
        r_link: String,
    },
    #[serde(rename = "createAnswer")]
    CreateAnswer {
        #[serde(rename = "roomId")]
        room_id: String,
        sdp: String,
    },
    #[serde(rename = "iceCandidate")]
    IceCandidate {
        #[serde(rename = "roomId")]
        room_id: String,
        candidate: String,
    },
    #[serde(rename = "chatMessage")]
    ChatMessage {
        #[serde(rename = "roomId")]
        room_id: String,
        text: String,
    },
    #[serde(rename = "editorContent")]
    EditorContent {
        #[serde(rename = "roomId")]
        room_id: String,
        content: String,
    },
    #[serde(rename = "terminateRoom")]
    TerminateRoom {
        #[serde(rename = "roomId")]
        room_id: String,
        role: PeerRole,
    },
    #[serde(other)]
    Unknown,
}

/// Frames delivered by the relay.
///
/// Forwarded negotiation/side-channel frames carry no `roomId`; the receiving
/// connection already knows which room it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "createOffer")]
    CreateOffer { sdp: String, r_link: String },
    #[serde(rename = "createAnswer")]
    CreateAnswer { sdp: String },
    #[serde(rename = "iceCandidate")]
    IceCandidate { candidate: String },
    #[serde(rename = "chatMessage")]
    ChatMessage { text: String },
    #[serde(rename = "editorContent")]
    EditorContent { content: String },
    // The original protocol spells this one in PascalCase.
    MeetingEnded { role: PeerRole },
    #[serde(rename = "participantLeft")]
    ParticipantLeft { role: PeerRole },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerMessage {
    /// The wire-level `type` tag of this frame, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::CreateOffer { .. } => "createOffer",
            ServerMessage::CreateAnswer { .. } => "createAnswer",
            ServerMessage::IceCandidate { .. } => "iceCandidate",
            ServerMessage::ChatMessage { .. } => "chatMessage",
            ServerMessage::EditorContent { .. } => "editorContent",
            ServerMessage::MeetingEnded { .. } => "MeetingEnded",
            ServerMessage::ParticipantLeft { .. } => "participantLeft",
            ServerMessage::Error { .. } => "error",
        }
    }
}
