//! UseCase 層: HTTP/WebSocket ハンドラから呼ばれるアプリケーションロジック

mod chat;
mod create_room;
mod delete_room;
mod error;
mod list_rooms;
mod rename_room;

pub use chat::ChatUseCase;
pub use create_room::CreateRoomUseCase;
pub use delete_room::DeleteRoomUseCase;
pub use error::{ChatError, CreateRoomError, DeleteRoomError, RenameRoomError};
pub use list_rooms::ListRoomsUseCase;
pub use rename_room::RenameRoomUseCase;
