//! UseCase: ルーム作成

use std::sync::Arc;

use crate::domain::{Owner, RepositoryError, Room, RoomName, RoomRepository};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 採番済みの新しいルーム
    /// * `Err(CreateRoomError)` - 名前が不正、または同名のルームが既にある
    pub async fn execute(&self, owner: Owner, name: String) -> Result<Room, CreateRoomError> {
        let name = RoomName::new(name)?;
        self.repository
            .create(owner, name)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateRoomName(name) => CreateRoomError::DuplicateName(name),
                other => CreateRoomError::Repository(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomId, ValidationError},
        infrastructure::repository::InMemoryRoomRepository,
    };

    #[tokio::test]
    async fn test_create_room_success() {
        // テスト項目: ルームが作成され、名前は前後の空白が除去される
        // given (前提条件):
        let usecase = CreateRoomUseCase::new(Arc::new(InMemoryRoomRepository::new()));

        // when (操作):
        let room = usecase
            .execute(Owner::new("alice"), " lobby ".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(room.id, RoomId::new(1));
        assert_eq!(room.name.as_str(), "lobby");
        assert_eq!(room.owner, Owner::new("alice"));
    }

    #[tokio::test]
    async fn test_create_room_empty_name() {
        // テスト項目: 空の名前ではリポジトリを呼ばずにエラーを返す
        // given (前提条件):
        let mut repository = crate::domain::MockRoomRepository::new();
        repository.expect_create().never();
        let usecase = CreateRoomUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(Owner::new("alice"), "".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CreateRoomError::InvalidName(ValidationError::EmptyRoomName))
        );
    }

    #[tokio::test]
    async fn test_create_room_duplicate_name() {
        // テスト項目: 同じ所有者の同名ルームは作成できない
        // given (前提条件):
        let usecase = CreateRoomUseCase::new(Arc::new(InMemoryRoomRepository::new()));
        usecase
            .execute(Owner::new("alice"), "lobby".to_string())
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(Owner::new("alice"), "lobby".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CreateRoomError::DuplicateName("lobby".to_string()))
        );
    }
}
