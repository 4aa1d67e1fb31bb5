//! Room entity.

use std::fmt;

/// Opaque room identifier assigned by the room directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
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

/// A named conversation scope.
///
/// `id` never changes once the directory has assigned it; only `name` is
/// updated by a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub owner: Option<String>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Ordering key for "newest first" listings.
    ///
    /// Directory ids are sequential integers in practice; numeric ids sort
    /// numerically and everything else falls back to string order.
    pub(crate) fn recency_key(&self) -> (u8, u64, &str) {
        match self.id.as_str().parse::<u64>() {
            Ok(n) => (1, n, ""),
            Err(_) => (0, 0, self.id.as_str()),
        }
    }
}

/// Sort rooms newest first.
pub(crate) fn sort_newest_first(rooms: &mut [Room]) {
    rooms.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_newest_first_numeric_ids() {
        // テスト項目: 数値 ID のルームは数値の降順に並ぶ
        // given (前提条件):
        let mut rooms = vec![Room::new("2", "b"), Room::new("10", "c"), Room::new("9", "a")];

        // when (操作):
        sort_newest_first(&mut rooms);

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "9", "2"]);
    }

    #[test]
    fn test_sort_newest_first_mixed_ids() {
        // テスト項目: 数値でない ID は数値 ID の後ろに文字列の降順で並ぶ
        // given (前提条件):
        let mut rooms = vec![
            Room::new("alpha", "a"),
            Room::new("1", "b"),
            Room::new("beta", "c"),
        ];

        // when (操作):
        sort_newest_first(&mut rooms);

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "beta", "alpha"]);
    }
}
