//! Room directory: the request/response collaborator that owns room records.
//!
//! The session never caches anything the directory returns beyond the room
//! list it shows; every call is a plain network round trip.

mod error;
mod http;

use async_trait::async_trait;

use crate::domain::{Room, RoomId};

pub use error::DirectoryError;
pub use http::{DirectoryConfig, HttpRoomDirectory};

/// Room CRUD operations consumed by the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Create a room owned by the caller.
    async fn create_room(&self, name: &str) -> Result<Room, DirectoryError>;

    /// List the caller's rooms in directory order.
    async fn list_rooms(&self) -> Result<Vec<Room>, DirectoryError>;

    /// Rename a room, returning the updated record.
    async fn rename_room(&self, id: &RoomId, name: &str) -> Result<Room, DirectoryError>;

    /// Delete a room.
    async fn delete_room(&self, id: &RoomId) -> Result<(), DirectoryError>;
}
