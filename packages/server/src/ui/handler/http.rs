//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};

use crate::{
    domain::Owner,
    infrastructure::dto::http::{
        CreateRoomQuery, ErrorDto, MessageDto, RenameRoomQuery, RoomDto,
    },
    ui::state::AppState,
    usecase::{CreateRoomError, DeleteRoomError, RenameRoomError},
};

type ApiError = (StatusCode, Json<ErrorDto>);

fn api_error(status: StatusCode, detail: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorDto {
            detail: detail.to_string(),
        }),
    )
}

/// Owner identity from `Authorization: Bearer <token>`; `anonymous` without one.
fn owner_from_headers(headers: &HeaderMap) -> Owner {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(Owner::new)
        .unwrap_or_else(Owner::anonymous)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /chat/create-room?roomName=`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CreateRoomQuery>,
) -> Result<Json<RoomDto>, ApiError> {
    let owner = owner_from_headers(&headers);
    match state
        .create_room_usecase
        .execute(owner.clone(), query.room_name)
        .await
    {
        Ok(room) => {
            tracing::info!("Room {} created for '{}'", room.id, owner.as_str());
            Ok(Json(RoomDto::from(&room)))
        }
        Err(e @ (CreateRoomError::InvalidName(_) | CreateRoomError::DuplicateName(_))) => {
            tracing::warn!("Rejected room creation: {}", e);
            Err(api_error(StatusCode::BAD_REQUEST, e))
        }
        Err(e @ CreateRoomError::Repository(_)) => {
            tracing::error!("Failed to create room: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// `GET /chat/rooms`
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<RoomDto>> {
    let owner = owner_from_headers(&headers);
    let rooms = state.list_rooms_usecase.execute(&owner).await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomDto::from).collect())
}

/// `PUT /chat/room/{room_id}?new_name=`
pub async fn rename_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
    Query(query): Query<RenameRoomQuery>,
) -> Result<Json<RoomDto>, ApiError> {
    let owner = owner_from_headers(&headers);
    match state
        .rename_room_usecase
        .execute(&owner, &room_id, query.new_name)
        .await
    {
        Ok(room) => Ok(Json(RoomDto::from(&room))),
        Err(e @ RenameRoomError::RoomNotFound(_)) => Err(api_error(StatusCode::NOT_FOUND, e)),
        Err(e @ (RenameRoomError::InvalidName(_) | RenameRoomError::DuplicateName(_))) => {
            tracing::warn!("Rejected rename of room {}: {}", room_id, e);
            Err(api_error(StatusCode::BAD_REQUEST, e))
        }
    }
}

/// `DELETE /chat/room/{room_id}`
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> Result<Json<MessageDto>, ApiError> {
    let owner = owner_from_headers(&headers);
    match state.delete_room_usecase.execute(&owner, &room_id).await {
        Ok(()) => {
            tracing::info!("Room {} deleted", room_id);
            Ok(Json(MessageDto {
                message: format!("Room {} deleted", room_id),
            }))
        }
        Err(e @ DeleteRoomError::RoomNotFound(_)) => Err(api_error(StatusCode::NOT_FOUND, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_owner_from_bearer_token() {
        // テスト項目: Bearer トークンが所有者名になる
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer alice"));

        // when (操作):
        let owner = owner_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(owner, Owner::new("alice"));
    }

    #[test]
    fn test_owner_without_token_is_anonymous() {
        // テスト項目: トークンが無い・Bearer 形式でない場合は anonymous
        // given (前提条件):
        let empty = HeaderMap::new();
        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        // when (操作) / then (期待する結果):
        assert_eq!(owner_from_headers(&empty), Owner::anonymous());
        assert_eq!(owner_from_headers(&basic), Owner::anonymous());
    }
}
