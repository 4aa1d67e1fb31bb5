//! Room エンティティ

use super::{Owner, RoomId, RoomName};

/// チャットルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub owner: Owner,
}

impl Room {
    pub fn new(id: RoomId, name: RoomName, owner: Owner) -> Self {
        Self { id, name, owner }
    }

    pub fn is_owned_by(&self, owner: &Owner) -> bool {
        &self.owner == owner
    }

    pub fn rename(&mut self, name: RoomName) {
        self.name = name;
    }
}
