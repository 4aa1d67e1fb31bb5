//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, ValidationError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error(transparent)]
    InvalidName(#[from] ValidationError),

    #[error("Room name '{0}' is already in use")]
    DuplicateName(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// ルーム改名のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameRoomError {
    #[error(transparent)]
    InvalidName(#[from] ValidationError),

    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error("Room name '{0}' is already in use")]
    DuplicateName(String),
}

/// ルーム削除のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteRoomError {
    #[error("Room {0} not found")]
    RoomNotFound(String),
}

/// チャットソケット接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// 存在しない、またはユーザーが所有していないルーム
    #[error("Room {0} not found")]
    RoomNotFound(String),
}
