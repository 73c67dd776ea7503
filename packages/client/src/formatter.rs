//! Message formatting utilities for client display.

use chrono::Local;
use tsunagi_shared::protocol::PeerRole;

/// Current wall-clock time as `HH:MM:SS`, for stamping received frames.
pub fn local_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed chat message.
    pub fn format_chat_message(text: &str, received_at: &str) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             peer: {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            text, received_at
        )
    }

    /// Format relayed editor content.
    pub fn format_editor_content(content: &str) -> String {
        format!(
            "\n\n============================================================\n\
             editor update:\n{}\n\
             ============================================================\n",
            content
        )
    }

    /// Format an incoming offer.
    pub fn format_offer(sdp: &str, r_link: &str) -> String {
        if r_link.is_empty() {
            format!("\n<- offer received (sdp: {})\n", sdp)
        } else {
            format!("\n<- offer received (sdp: {}, link: {})\n", sdp, r_link)
        }
    }

    /// Format an incoming answer.
    pub fn format_answer(sdp: &str) -> String {
        format!("\n<- answer received (sdp: {})\n", sdp)
    }

    /// Format an incoming ICE candidate.
    pub fn format_ice_candidate(candidate: &str) -> String {
        format!("\n<- ice candidate received: {}\n", candidate)
    }

    /// Format the meeting-ended notice.
    pub fn format_meeting_ended(role: PeerRole) -> String {
        format!("\n* Meeting ended (notified as {})\n", role)
    }

    /// Format the participant-left notice.
    pub fn format_participant_left(role: PeerRole) -> String {
        format!("\n- The {} left the room\n", role)
    }

    /// Format a server error reply.
    pub fn format_error(message: &str) -> String {
        format!("\n! Server error: {}\n", message)
    }

    /// Format a raw text frame (when parsing fails).
    pub fn format_raw_message(text: &str) -> String {
        format!("\n<- Received: {}\n", text)
    }
}
