//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Owner, RepositoryError, Room, RoomId, RoomName};

/// Room Repository trait
///
/// 所有者の異なるルームは存在しないものとして扱う（`RoomNotFound`）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい ID を採番してルームを作成
    async fn create(&self, owner: Owner, name: RoomName) -> Result<Room, RepositoryError>;

    /// 所有者のルームを ID 順に取得
    async fn list_by_owner(&self, owner: &Owner) -> Vec<Room>;

    /// 所有者のルームを取得
    async fn find(&self, id: RoomId, owner: &Owner) -> Result<Room, RepositoryError>;

    /// ルーム名を変更
    async fn rename(
        &self,
        id: RoomId,
        owner: &Owner,
        name: RoomName,
    ) -> Result<Room, RepositoryError>;

    /// ルームを削除
    async fn delete(&self, id: RoomId, owner: &Owner) -> Result<(), RepositoryError>;
}
