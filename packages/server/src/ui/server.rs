//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::{Responder, RoomRepository},
    usecase::{
        ChatUseCase, CreateRoomUseCase, DeleteRoomUseCase, ListRoomsUseCase, RenameRoomUseCase,
    },
};

use super::{
    handler::{
        create_room, delete_room, health_check, list_rooms, rename_room, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room directory and chat socket server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     Arc::new(InMemoryRoomRepository::new()),
///     Arc::new(EchoResponder),
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Wire the usecases around a repository and a responder
    pub fn new(repository: Arc<dyn RoomRepository>, responder: Arc<dyn Responder>) -> Self {
        let state = AppState {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(repository.clone())),
            list_rooms_usecase: Arc::new(ListRoomsUseCase::new(repository.clone())),
            rename_room_usecase: Arc::new(RenameRoomUseCase::new(repository.clone())),
            delete_room_usecase: Arc::new(DeleteRoomUseCase::new(repository.clone())),
            chat_usecase: Arc::new(ChatUseCase::new(repository, responder)),
        };
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/chat/{room_id}/{username}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/chat/create-room", post(create_room))
            .route("/chat/rooms", get(list_rooms))
            .route("/chat/room/{room_id}", put(rename_room).delete(delete_room))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Kaiwa server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
