//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Room;

/// Room record as exchanged with clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: String,
    #[serde(rename = "roomName")]
    pub room_name: String,
    pub owner: String,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            room_name: room.name.as_str().to_string(),
            owner: room.owner.as_str().to_string(),
        }
    }
}

/// Query of `POST /chat/create-room`
#[derive(Debug, Deserialize)]
pub struct CreateRoomQuery {
    #[serde(rename = "roomName", default)]
    pub room_name: String,
}

/// Query of `PUT /chat/room/{id}`
#[derive(Debug, Deserialize)]
pub struct RenameRoomQuery {
    #[serde(default)]
    pub new_name: String,
}

/// Body of a successful `DELETE /chat/room/{id}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

/// Body of an error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub detail: String,
}
