//! Server-assigned connection identity.

use std::fmt;

use uuid::Uuid;

/// Opaque identity of one WebSocket connection.
///
/// Assigned when the transport accepts the connection. Two frames belong to
/// the same participant exactly when they carry the same `ConnectionId`; the
/// relay never trusts client-supplied identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ids_are_unique() {
        // given / when:
        let a = ConnectionId::new();
        let b = ConnectionId::new();

        // then:
        assert_ne!(a, b);
    }

    #[test]
    fn test_connection_id_equality_is_stable_across_copies() {
        // given:
        let a = ConnectionId::new();

        // when:
        let copy = a;

        // then:
        assert_eq!(a, copy);
    }
}
