//! ドメイン層のエラー型

use thiserror::Error;

use super::RoomId;

/// 値オブジェクトの生成時に発生するバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Room name must not be empty")]
    EmptyRoomName,

    #[error("Room name is too long ({0} characters)")]
    RoomNameTooLong(usize),

    #[error("Invalid room id: '{0}'")]
    InvalidRoomId(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 存在しない、または呼び出し元が所有していない
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    /// 同じ所有者が同名のルームを既に持っている
    #[error("Room name '{0}' is already in use")]
    DuplicateRoomName(String),
}
