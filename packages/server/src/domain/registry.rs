//! Room registry: the mapping from room identifier to room state.
//!
//! The registry itself is a plain synchronous map. The routing layer owns it
//! behind one coarse `tokio::sync::Mutex` ([`SharedRoomRegistry`]) and locks
//! it once per connection event, so every room transition runs to completion
//! before the next event is applied. There is no per-room locking.
//!
//! The registry is constructed at server startup and injected into every
//! usecase; nothing in this crate reaches for a global.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tsunagi_shared::protocol::PeerRole;

use super::{ConnectionId, Room, RoomId};

/// The registry handle shared by the routing usecases.
pub type SharedRoomRegistry = Arc<Mutex<RoomRegistry>>;

/// Mapping from room identifier to room state.
///
/// Entries are created lazily on the first `joinRoom` naming an unseen
/// identifier and removed when the receiver departs.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the room for `room_id`, creating an empty one if absent.
    pub fn get_or_create(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_default()
    }

    /// Return the room for `room_id` without creating it.
    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Mutable access to an existing room; does not create.
    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Delete the entry if present. No-op when absent.
    pub fn remove(&mut self, room_id: &RoomId) {
        self.rooms.remove(room_id);
    }

    /// Find the room and role `conn` occupies, if any.
    ///
    /// A connection holds at most one role in at most one room, so the first
    /// match is the only match.
    pub fn find_membership(&self, conn: ConnectionId) -> Option<(RoomId, PeerRole)> {
        self.rooms
            .iter()
            .find_map(|(room_id, room)| room.role_of(conn).map(|role| (room_id.clone(), role)))
    }

    /// Read-only view of all rooms, for the debug listing.
    pub fn rooms(&self) -> impl Iterator<Item = (&RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_room_returns_none() {
        // given:
        let registry = RoomRegistry::new();

        // when / then: identifiers never referenced have no entry
        assert!(registry.get(&RoomId::from("never-seen")).is_none());
    }

    #[test]
    fn test_get_or_create_inserts_an_empty_room() {
        // given:
        let mut registry = RoomRegistry::new();
        let room_id = RoomId::from("r1");

        // when:
        let room = registry.get_or_create(&room_id);

        // then:
        assert!(room.is_empty());
        assert!(registry.get(&room_id).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_returns_the_existing_room() {
        // given:
        let mut registry = RoomRegistry::new();
        let room_id = RoomId::from("r1");
        let sender = ConnectionId::new();
        registry.get_or_create(&room_id).claim_sender(sender);

        // when:
        let room = registry.get_or_create(&room_id);

        // then: no fresh room replaced the occupied one
        assert_eq!(room.sender(), Some(sender));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        // given:
        let mut registry = RoomRegistry::new();
        let room_id = RoomId::from("r1");
        registry.get_or_create(&room_id);

        // when:
        registry.remove(&room_id);
        registry.remove(&room_id);

        // then:
        assert!(registry.get(&room_id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_membership_reports_room_and_role() {
        // given:
        let mut registry = RoomRegistry::new();
        let room_id = RoomId::from("r1");
        let sender = ConnectionId::new();
        let receiver = ConnectionId::new();
        registry.get_or_create(&room_id).claim_sender(sender);
        registry.get_or_create(&room_id).set_receiver(receiver);

        // when / then:
        assert_eq!(
            registry.find_membership(sender),
            Some((room_id.clone(), PeerRole::Sender))
        );
        assert_eq!(
            registry.find_membership(receiver),
            Some((room_id, PeerRole::Receiver))
        );
    }

    #[test]
    fn test_find_membership_for_unregistered_connection() {
        // given:
        let mut registry = RoomRegistry::new();
        registry
            .get_or_create(&RoomId::from("r1"))
            .claim_sender(ConnectionId::new());

        // when / then:
        assert_eq!(registry.find_membership(ConnectionId::new()), None);
    }
}
