//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{
    ChatUseCase, CreateRoomUseCase, DeleteRoomUseCase, ListRoomsUseCase, RenameRoomUseCase,
};

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// RenameRoomUseCase（ルーム改名のユースケース）
    pub rename_room_usecase: Arc<RenameRoomUseCase>,
    /// DeleteRoomUseCase（ルーム削除のユースケース）
    pub delete_room_usecase: Arc<DeleteRoomUseCase>,
    /// ChatUseCase（チャットソケットのユースケース）
    pub chat_usecase: Arc<ChatUseCase>,
}
