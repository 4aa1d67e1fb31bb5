//! UseCase: ルーム削除

use std::sync::Arc;

use crate::domain::{Owner, RoomId, RoomRepository};

use super::error::DeleteRoomError;

/// ルーム削除のユースケース
pub struct DeleteRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl DeleteRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム削除を実行
    pub async fn execute(&self, owner: &Owner, room_id: &str) -> Result<(), DeleteRoomError> {
        let not_found = || DeleteRoomError::RoomNotFound(room_id.to_string());
        let id = RoomId::try_from(room_id).map_err(|_| not_found())?;
        self.repository
            .delete(id, owner)
            .await
            .map_err(|_| not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockRoomRepository, RepositoryError};

    #[tokio::test]
    async fn test_delete_room_success() {
        // テスト項目: リポジトリに ID と所有者が渡され、削除が成功する
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_delete()
            .withf(|id, owner| *id == RoomId::new(3) && owner.as_str() == "alice")
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = DeleteRoomUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(&Owner::new("alice"), "3").await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_delete_room_not_found() {
        // テスト項目: 存在しないルームの削除は RoomNotFound
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_delete()
            .returning(|id, _| Err(RepositoryError::RoomNotFound(id)));
        let usecase = DeleteRoomUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(&Owner::new("alice"), "3").await;

        // then (期待する結果):
        assert_eq!(result, Err(DeleteRoomError::RoomNotFound("3".to_string())));
    }

    #[tokio::test]
    async fn test_delete_room_invalid_id() {
        // テスト項目: 整数でない ID はリポジトリを呼ばずに RoomNotFound
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository.expect_delete().never();
        let usecase = DeleteRoomUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(&Owner::new("alice"), "room-x").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DeleteRoomError::RoomNotFound("room-x".to_string()))
        );
    }
}
