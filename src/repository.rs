//! Keyed storage for rooms.

use std::collections::BTreeMap;

use crate::room::{Room, RoomId};

/// Storage the dungeon uses to look rooms up by id.
///
/// Lookups of ids that were never saved return `None`/`false`; nothing here panics.
pub trait RoomRepository {
    /// Store a room under its own id. Returns the room it replaced, if any.
    fn save(&mut self, room: Room) -> Option<Room>;

    fn find(&self, id: RoomId) -> Option<&Room>;

    fn find_mut(&mut self, id: RoomId) -> Option<&mut Room>;

    /// All stored ids, ascending.
    fn ids(&self) -> Vec<RoomId>;

    fn delete(&mut self, id: RoomId) -> Option<Room>;

    fn exists(&self, id: RoomId) -> bool {
        self.find(id).is_some()
    }

    fn count(&self) -> usize;

    fn clear(&mut self);
}

/// Rooms held in memory for the lifetime of a session.
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    rooms: BTreeMap<RoomId, Room>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.values_mut()
    }
}

impl RoomRepository for InMemoryRoomRepository {
    fn save(&mut self, room: Room) -> Option<Room> {
        let replaced = self.rooms.insert(room.id(), room);
        if let Some(old) = &replaced {
            log::debug!("room {} replaced in repository", old.id());
        }
        replaced
    }

    fn find(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    fn find_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    fn ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    fn delete(&mut self, id: RoomId) -> Option<Room> {
        self.rooms.remove(&id)
    }

    fn exists(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    fn count(&self) -> usize {
        self.rooms.len()
    }

    fn clear(&mut self) {
        self.rooms.clear();
    }
}
