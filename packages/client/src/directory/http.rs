//! HTTP implementation of [`RoomDirectory`].
//!
//! Routes:
//!
//! | operation | request |
//! |-----------|---------|
//! | create    | `POST /chat/create-room?roomName=` |
//! | list      | `GET /chat/rooms` |
//! | rename    | `PUT /chat/room/{id}?new_name=` |
//! | delete    | `DELETE /chat/room/{id}` |

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::domain::{Room, RoomId};

use super::{DirectoryError, RoomDirectory};

/// Connection settings for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Opaque bearer token identifying the caller
    pub access_token: Option<String>,
}

impl DirectoryConfig {
    /// Settings for `username`. Without an explicit token the username
    /// itself is sent, so rooms are owned by the same identity that joins
    /// them over the chat socket.
    pub fn for_user(
        base_url: impl Into<String>,
        username: &str,
        access_token: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.or_else(|| Some(username.to_string())),
        }
    }
}

/// Room record as the directory serializes it.
#[derive(Debug, Deserialize)]
struct RoomRecord {
    id: RawRoomId,
    #[serde(rename = "roomName")]
    room_name: String,
    #[serde(default)]
    owner: Option<String>,
}

/// Directory ids come back either as integers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRoomId {
    Number(i64),
    Text(String),
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        let id = match record.id {
            RawRoomId::Number(n) => n.to_string(),
            RawRoomId::Text(s) => s,
        };
        Self {
            id: RoomId::new(id),
            name: record.room_name,
            owner: record.owner,
        }
    }
}

pub struct HttpRoomDirectory {
    client: Client,
    config: DirectoryConfig,
}

impl HttpRoomDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder, subject: &str) -> Result<Response, DirectoryError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        tracing::debug!("Directory request for {} failed: {} {}", subject, status, detail);
        Err(match status {
            StatusCode::NOT_FOUND => DirectoryError::NotFound(subject.to_string()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                DirectoryError::Validation(detail)
            }
            _ => DirectoryError::UnexpectedResponse(detail),
        })
    }

    async fn read_room(response: Response) -> Result<Room, DirectoryError> {
        response
            .json::<RoomRecord>()
            .await
            .map(Room::from)
            .map_err(|e| DirectoryError::UnexpectedResponse(e.to_string()))
    }
}

#[async_trait]
impl RoomDirectory for HttpRoomDirectory {
    async fn create_room(&self, name: &str) -> Result<Room, DirectoryError> {
        let request = self
            .client
            .post(self.url("/chat/create-room"))
            .query(&[("roomName", name)]);
        let response = self.execute(request, name).await?;
        Self::read_room(response).await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, DirectoryError> {
        let request = self.client.get(self.url("/chat/rooms"));
        let response = self.execute(request, "rooms").await?;
        let records = response
            .json::<Vec<RoomRecord>>()
            .await
            .map_err(|e| DirectoryError::UnexpectedResponse(e.to_string()))?;
        Ok(records.into_iter().map(Room::from).collect())
    }

    async fn rename_room(&self, id: &RoomId, name: &str) -> Result<Room, DirectoryError> {
        let request = self
            .client
            .put(self.url(&format!("/chat/room/{}", id)))
            .query(&[("new_name", name)]);
        let response = self.execute(request, id.as_str()).await?;
        Self::read_room(response).await
    }

    async fn delete_room(&self, id: &RoomId) -> Result<(), DirectoryError> {
        let request = self.client.delete(self.url(&format!("/chat/room/{}", id)));
        self.execute(request, id.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_record_with_numeric_id() {
        // テスト項目: 数値 ID のレコードが Room に変換される
        // given (前提条件):
        let json = r#"{"id": 42, "roomName": "Brave-Teal-Otter", "owner": "alice"}"#;

        // when (操作):
        let room: Room = serde_json::from_str::<RoomRecord>(json).unwrap().into();

        // then (期待する結果):
        assert_eq!(room.id, RoomId::new("42"));
        assert_eq!(room.name, "Brave-Teal-Otter");
        assert_eq!(room.owner.as_deref(), Some("alice"));
    }

    #[test]
    fn test_room_record_without_owner() {
        // テスト項目: owner を含まないレコード（一覧 API）も変換できる
        // given (前提条件):
        let json = r#"{"id": "r-1", "roomName": "general"}"#;

        // when (操作):
        let room: Room = serde_json::from_str::<RoomRecord>(json).unwrap().into();

        // then (期待する結果):
        assert_eq!(room, Room::new("r-1", "general"));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        // テスト項目: ベース URL 末尾のスラッシュが重複しない
        // given (前提条件):
        let directory = HttpRoomDirectory::new(DirectoryConfig {
            base_url: "http://localhost:8000/".to_string(),
            access_token: None,
        });

        // when (操作):
        let url = directory.url("/chat/rooms");

        // then (期待する結果):
        assert_eq!(url, "http://localhost:8000/chat/rooms");
    }

    #[test]
    fn test_for_user_defaults_token_to_username() {
        // テスト項目: トークン未指定ならユーザー名がトークンになり、指定があればそれを使う
        // given (前提条件) / when (操作):
        let implicit = DirectoryConfig::for_user("http://localhost:8000", "alice", None);
        let explicit =
            DirectoryConfig::for_user("http://localhost:8000", "alice", Some("secret".to_string()));

        // then (期待する結果):
        assert_eq!(implicit.access_token.as_deref(), Some("alice"));
        assert_eq!(explicit.access_token.as_deref(), Some("secret"));
    }
}
