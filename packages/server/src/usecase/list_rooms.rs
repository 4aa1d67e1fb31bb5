//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Owner, Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl ListRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 所有者のルームを ID 順で返す
    pub async fn execute(&self, owner: &Owner) -> Vec<Room> {
        self.repository.list_by_owner(owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::RoomName, infrastructure::repository::InMemoryRoomRepository};

    #[tokio::test]
    async fn test_list_rooms_only_returns_own_rooms() {
        // テスト項目: 呼び出し元のルームだけが返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let alice = Owner::new("alice");
        for (owner, name) in [("alice", "a1"), ("bob", "b1"), ("alice", "a2")] {
            repository
                .create(Owner::new(owner), RoomName::new(name.to_string()).unwrap())
                .await
                .unwrap();
        }
        let usecase = ListRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|r| r.is_owned_by(&alice)));
    }

    #[tokio::test]
    async fn test_list_rooms_empty() {
        // テスト項目: ルームが無い場合は空のリスト
        // given (前提条件):
        let usecase = ListRoomsUseCase::new(Arc::new(InMemoryRoomRepository::new()));

        // when (操作):
        let rooms = usecase.execute(&Owner::anonymous()).await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }
}
