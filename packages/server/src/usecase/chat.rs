//! UseCase: チャットソケット
//!
//! 接続時にルームの存在と所有者を確認し、受信したテキストへの返答を Responder に委ねる。

use std::sync::Arc;

use crate::domain::{Owner, Responder, Room, RoomId, RoomRepository};

use super::error::ChatError;

/// チャットソケットのユースケース
pub struct ChatUseCase {
    repository: Arc<dyn RoomRepository>,
    responder: Arc<dyn Responder>,
}

impl ChatUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, responder: Arc<dyn Responder>) -> Self {
        Self {
            repository,
            responder,
        }
    }

    /// `username` が `room_id` のルームに参加できるか確認し、ルームを返す
    pub async fn join(&self, room_id: &str, username: &str) -> Result<Room, ChatError> {
        let not_found = || ChatError::RoomNotFound(room_id.to_string());
        let id = RoomId::try_from(room_id).map_err(|_| not_found())?;
        self.repository
            .find(id, &Owner::new(username))
            .await
            .map_err(|_| not_found())
    }

    /// 受信したテキストへの返答を生成
    pub async fn reply(&self, room: &Room, username: &str, text: &str) -> String {
        self.responder.respond(room, username, text).await
    }
}
