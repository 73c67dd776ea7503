//! Room entity: the pair of role slots a rendezvous point consists of.

use std::fmt;

use tsunagi_shared::protocol::PeerRole;

use super::ConnectionId;

/// Client-supplied room identifier.
///
/// Opaque: not validated beyond equality. Whatever string the client names is
/// the room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rendezvous point holding at most one sender and one receiver connection.
///
/// Invariant: each role slot holds at most one connection. The slots hold
/// identities only; the channels behind them are owned by the transport layer
/// and reached through the message pusher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    sender: Option<ConnectionId>,
    receiver: Option<ConnectionId>,
}

impl Room {
    /// Create an empty room with both role slots vacant.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> Option<ConnectionId> {
        self.sender
    }

    pub fn receiver(&self) -> Option<ConnectionId> {
        self.receiver
    }

    /// Try to take the sender slot.
    ///
    /// Returns `false` when the slot is already occupied, including by the
    /// claiming connection itself; the slot is left untouched in that case.
    pub fn claim_sender(&mut self, conn: ConnectionId) -> bool {
        if self.sender.is_some() {
            return false;
        }
        self.sender = Some(conn);
        true
    }

    /// Take the receiver slot unconditionally. The last joiner wins.
    pub fn set_receiver(&mut self, conn: ConnectionId) {
        self.receiver = Some(conn);
    }

    /// Vacate the sender slot. The room itself stays alive for a future sender.
    pub fn clear_sender(&mut self) {
        self.sender = None;
    }

    /// The role `conn` currently holds in this room, if any.
    pub fn role_of(&self, conn: ConnectionId) -> Option<PeerRole> {
        if self.sender == Some(conn) {
            Some(PeerRole::Sender)
        } else if self.receiver == Some(conn) {
            Some(PeerRole::Receiver)
        } else {
            None
        }
    }

    /// The opposite endpoint of `conn`, when `conn` holds a slot and the
    /// opposite slot is occupied.
    pub fn peer_of(&self, conn: ConnectionId) -> Option<ConnectionId> {
        match self.role_of(conn)? {
            PeerRole::Sender => self.receiver,
            PeerRole::Receiver => self.sender,
        }
    }

    /// Both role slots vacant. Such a room is logically dead and must not be
    /// kept in the registry.
    pub fn is_empty(&self) -> bool {
        self.sender.is_none() && self.receiver.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_sender_on_vacant_slot() {
        // given:
        let mut room = Room::new();
        let conn = ConnectionId::new();

        // when:
        let claimed = room.claim_sender(conn);

        // then:
        assert!(claimed);
        assert_eq!(room.sender(), Some(conn));
    }

    #[test]
    fn test_claim_sender_on_occupied_slot_is_rejected() {
        // given:
        let mut room = Room::new();
        let first = ConnectionId::new();
        let second = ConnectionId::new();
        room.claim_sender(first);

        // when:
        let claimed = room.claim_sender(second);

        // then: slot keeps the first connection
        assert!(!claimed);
        assert_eq!(room.sender(), Some(first));
    }

    #[test]
    fn test_claim_sender_twice_by_same_connection_is_rejected() {
        // given:
        let mut room = Room::new();
        let conn = ConnectionId::new();
        room.claim_sender(conn);

        // when: the occupancy check does not special-case the holder
        let claimed = room.claim_sender(conn);

        // then:
        assert!(!claimed);
        assert_eq!(room.sender(), Some(conn));
    }

    #[test]
    fn test_set_receiver_overwrites_previous_receiver() {
        // given:
        let mut room = Room::new();
        let first = ConnectionId::new();
        let second = ConnectionId::new();

        // when:
        room.set_receiver(first);
        room.set_receiver(second);

        // then: last joiner wins
        assert_eq!(room.receiver(), Some(second));
    }

    #[test]
    fn test_role_of_each_slot() {
        // given:
        let mut room = Room::new();
        let sender = ConnectionId::new();
        let receiver = ConnectionId::new();
        let stranger = ConnectionId::new();
        room.claim_sender(sender);
        room.set_receiver(receiver);

        // when / then:
        assert_eq!(room.role_of(sender), Some(PeerRole::Sender));
        assert_eq!(room.role_of(receiver), Some(PeerRole::Receiver));
        assert_eq!(room.role_of(stranger), None);
    }

    #[test]
    fn test_peer_of_is_the_opposite_endpoint() {
        // given:
        let mut room = Room::new();
        let sender = ConnectionId::new();
        let receiver = ConnectionId::new();
        room.claim_sender(sender);
        room.set_receiver(receiver);

        // when / then:
        assert_eq!(room.peer_of(sender), Some(receiver));
        assert_eq!(room.peer_of(receiver), Some(sender));
    }

    #[test]
    fn test_peer_of_with_vacant_opposite_slot() {
        // given:
        let mut room = Room::new();
        let sender = ConnectionId::new();
        room.claim_sender(sender);

        // when / then: a member with no counterpart has no peer
        assert_eq!(room.peer_of(sender), None);
    }

    #[test]
    fn test_peer_of_for_non_member() {
        // given:
        let mut room = Room::new();
        room.claim_sender(ConnectionId::new());
        room.set_receiver(ConnectionId::new());

        // when / then:
        assert_eq!(room.peer_of(ConnectionId::new()), None);
    }

    #[test]
    fn test_is_empty_after_clearing_sender() {
        // given:
        let mut room = Room::new();
        let sender = ConnectionId::new();
        room.claim_sender(sender);
        assert!(!room.is_empty());

        // when:
        room.clear_sender();

        // then:
        assert!(room.is_empty());
    }
}
