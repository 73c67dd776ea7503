//! Prompt input parsing.
//!
//! Pure functions turning a prompt line into the frame to send, so the
//! command grammar can be tested without a terminal or a connection.
//!
//! Grammar: a plain line is a chat message; `/offer <sdp> [r_link]`,
//! `/answer <sdp>`, `/ice <candidate>` and `/editor <content>` send the
//! corresponding negotiation/side-channel frames; `/leave` terminates the
//! room under the client's own role. Unknown `/commands` parse to nothing.

use tsunagi_shared::protocol::{ClientMessage, PeerRole};

/// Parse one prompt line into the frame to send, if any.
pub fn parse_input(line: &str, room_id: &str, role: PeerRole) -> Option<ClientMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix("/offer ") {
        let rest = rest.trim();
        let (sdp, r_link) = match rest.split_once(' ') {
            Some((sdp, r_link)) => (sdp.to_string(), r_link.trim().to_string()),
            None => (rest.to_string(), String::new()),
        };
        return Some(ClientMessage::CreateOffer {
            room_id: room_id.to_string(),
            sdp,
            r_link,
        });
    }

    if let Some(rest) = line.strip_prefix("/answer ") {
        return Some(ClientMessage::CreateAnswer {
            room_id: room_id.to_string(),
            sdp: rest.trim().to_string(),
        });
    }

    if let Some(rest) = line.strip_prefix("/ice ") {
        return Some(ClientMessage::IceCandidate {
            room_id: room_id.to_string(),
            candidate: rest.trim().to_string(),
        });
    }

    if let Some(rest) = line.strip_prefix("/editor ") {
        return Some(ClientMessage::EditorContent {
            room_id: room_id.to_string(),
            content: rest.to_string(),
        });
    }

    if line == "/leave" {
        return Some(ClientMessage::TerminateRoom {
            room_id: room_id.to_string(),
            role,
        });
    }

    if line.starts_with('/') {
        // Unknown command; the caller decides how to complain.
        return None;
    }

    Some(ClientMessage::ChatMessage {
        room_id: room_id.to_string(),
        text: line.to_string(),
    })
}
