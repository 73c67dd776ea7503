//! Client execution logic with reconnection support.

use std::time::Duration;

use tsunagi_shared::protocol::PeerRole;

use crate::{error::ClientError, session::run_client_session};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should exit immediately based on the error type.
///
/// A rejected sender claim cannot be fixed by reconnecting: the slot is
/// taken.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::RoomOccupied(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}

/// Run the signaling client with reconnection logic
pub async fn run_client(url: String, room_id: String, role: PeerRole) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (room '{}', role {}) (attempt {}/{})",
            url,
            room_id,
            role,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &room_id, role).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_on_occupied_room() {
        // given:
        let error = ClientError::RoomOccupied("r1".to_string());

        // when / then: reconnecting cannot free the slot
        assert!(should_exit_immediately(&error));
    }

    #[test]
    fn test_should_not_exit_immediately_on_connection_error() {
        // given:
        let error = ClientError::ConnectionError("network error".to_string());

        // when / then:
        assert!(!should_exit_immediately(&error));
    }

    #[test]
    fn test_should_not_reconnect_on_occupied_room() {
        // given:
        let error = ClientError::RoomOccupied("r1".to_string());

        // when / then:
        assert!(!should_attempt_reconnect(&error, 0, 5));
    }

    #[test]
    fn test_should_reconnect_within_limit() {
        // given:
        let error = ClientError::ConnectionError("network error".to_string());

        // when / then:
        assert!(should_attempt_reconnect(&error, 0, 5));
        assert!(should_attempt_reconnect(&error, 4, 5));
    }

    #[test]
    fn test_should_not_reconnect_at_limit() {
        // given:
        let error = ClientError::ConnectionError("network error".to_string());

        // when / then:
        assert!(!should_attempt_reconnect(&error, 5, 5));
    }
}
