mod http;
mod websocket;

pub use http::{create_room, delete_room, health_check, list_rooms, rename_room};
pub use websocket::websocket_handler;
