//! UseCase: ルーム改名

use std::sync::Arc;

use crate::domain::{Owner, RepositoryError, Room, RoomId, RoomName, RoomRepository};

use super::error::RenameRoomError;

/// ルーム改名のユースケース
pub struct RenameRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl RenameRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム改名を実行
    ///
    /// # Arguments
    ///
    /// * `owner` - 呼び出し元
    /// * `room_id` - パスから受け取った ID（整数でなければ RoomNotFound）
    /// * `new_name` - 新しい名前
    pub async fn execute(
        &self,
        owner: &Owner,
        room_id: &str,
        new_name: String,
    ) -> Result<Room, RenameRoomError> {
        let id = RoomId::try_from(room_id)
            .map_err(|_| RenameRoomError::RoomNotFound(room_id.to_string()))?;
        let name = RoomName::new(new_name)?;
        self.repository
            .rename(id, owner, name)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(id) => RenameRoomError::RoomNotFound(id.to_string()),
                RepositoryError::DuplicateRoomName(name) => RenameRoomError::DuplicateName(name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ValidationError, infrastructure::repository::InMemoryRoomRepository};

    async fn setup() -> (RenameRoomUseCase, Room) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let room = repository
            .create(Owner::new("alice"), RoomName::new("old".to_string()).unwrap())
            .await
            .unwrap();
        (RenameRoomUseCase::new(repository), room)
    }

    #[tokio::test]
    async fn test_rename_room_success() {
        // テスト項目: ルーム名が変更される
        // given (前提条件):
        let (usecase, room) = setup().await;

        // when (操作):
        let renamed = usecase
            .execute(&Owner::new("alice"), &room.id.to_string(), "new".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(renamed.id, room.id);
        assert_eq!(renamed.name.as_str(), "new");
    }

    #[tokio::test]
    async fn test_rename_room_not_found() {
        // テスト項目: 存在しない ID・整数でない ID・他人のルームは RoomNotFound
        // given (前提条件):
        let (usecase, room) = setup().await;
        let alice = Owner::new("alice");

        // when (操作) / then (期待する結果):
        assert_eq!(
            usecase.execute(&alice, "99", "x".to_string()).await,
            Err(RenameRoomError::RoomNotFound("99".to_string()))
        );
        assert_eq!(
            usecase.execute(&alice, "abc", "x".to_string()).await,
            Err(RenameRoomError::RoomNotFound("abc".to_string()))
        );
        assert_eq!(
            usecase
                .execute(&Owner::new("bob"), &room.id.to_string(), "x".to_string())
                .await,
            Err(RenameRoomError::RoomNotFound(room.id.to_string()))
        );
    }

    #[tokio::test]
    async fn test_rename_room_empty_name() {
        // テスト項目: 空の名前への改名はエラー
        // given (前提条件):
        let (usecase, room) = setup().await;

        // when (操作):
        let result = usecase
            .execute(&Owner::new("alice"), &room.id.to_string(), "  ".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RenameRoomError::InvalidName(ValidationError::EmptyRoomName))
        );
    }
}
