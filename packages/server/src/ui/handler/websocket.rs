//! WebSocket chat socket handler.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{domain::Room, ui::state::AppState};

/// `GET /ws/chat/{room_id}/{username}`
///
/// The upgrade always succeeds; a room that is unknown or not owned by
/// `username` gets a single error text before the socket is closed.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((room_id, username)): Path<(String, String)>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, room_id, username))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: String, username: String) {
    let (mut sender, mut receiver) = socket.split();

    let room = match state.chat_usecase.join(&room_id, &username).await {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Rejecting '{}' from room {}: {}", username, room_id, e);
            let _ = sender.send(Message::Text(format!("error: {}", e).into())).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };
    tracing::info!("'{}' joined room {}", username, room.id);

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text in room {}: {}", room.id, text);
                if let Err(e) = reply(&state, &room, &username, &mut sender, text.as_str()).await {
                    tracing::warn!("Failed to reply in room {}: {}", room.id, e);
                    break;
                }
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("'{}' left room {}", username, room.id);
                break;
            }
            _ => {}
        }
    }
}

async fn reply(
    state: &AppState,
    room: &Room,
    username: &str,
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    text: &str,
) -> Result<(), axum::Error> {
    let answer = state.chat_usecase.reply(room, username, text).await;
    sender.send(Message::Text(answer.into())).await
}
