use std::{sync::Arc, time::Duration};

use kaiwa_shared::time::{Clock, SystemClock};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    connection::Connector,
    directory::RoomDirectory,
    domain::{MessageId, RandomRoomNames, Rating, Room, RoomId, RoomNameGenerator},
};

use super::{
    SendError, SendOutcome, SessionSnapshot,
    actor::{Command, SessionActor},
};

const DEFAULT_OPEN_TIMEOUT_SECS: u64 = 5;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 3;

/// Tunables of a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Upper bound for a send waiting on a connection to open
    pub open_timeout: Duration,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            open_timeout: Duration::from_secs(DEFAULT_OPEN_TIMEOUT_SECS),
            notification_ttl: Duration::from_secs(DEFAULT_NOTIFICATION_TTL_SECS),
        }
    }
}

/// Collaborators injected into a session.
pub struct SessionDeps {
    pub directory: Arc<dyn RoomDirectory>,
    pub connector: Arc<dyn Connector>,
    pub names: Arc<dyn RoomNameGenerator>,
    pub clock: Arc<dyn Clock>,
}

impl SessionDeps {
    /// Random room names and the system clock.
    pub fn new(directory: Arc<dyn RoomDirectory>, connector: Arc<dyn Connector>) -> Self {
        Self {
            directory,
            connector,
            names: Arc::new(RandomRoomNames),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_names(mut self, names: Arc<dyn RoomNameGenerator>) -> Self {
        self.names = names;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Cloneable front door to a running session.
///
/// Operations never return errors: failures show up in the snapshot as a
/// notification or a connection status. Only `send_message` reports an
/// outcome, because its caller may want to know whether the text went out.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Spawn the session task. Requires a Tokio runtime.
    ///
    /// The task stops on [`shutdown`](Self::shutdown) or once every handle is dropped.
    pub fn spawn(deps: SessionDeps, config: SessionConfig) -> Self {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots) = watch::channel(SessionSnapshot::default());
        let (actor, inbox) = SessionActor::new(deps, config, snapshots_tx);
        tokio::spawn(actor.run(commands_rx, inbox));
        Self {
            commands,
            snapshots,
        }
    }

    /// Load the room list and select the newest room, creating one if there is none.
    pub async fn initialize(&self) {
        self.request(|reply| Command::Initialize { reply }).await;
    }

    pub async fn select_room(&self, room: Option<Room>) {
        self.request(|reply| Command::SelectRoom { room, reply })
            .await;
    }

    /// Create a room with a generated name and select it.
    pub async fn create_room(&self) {
        self.request(|reply| Command::CreateRoom { reply }).await;
    }

    /// Send text to the current room, creating a room first if needed.
    ///
    /// Resolves once the text has been handed to the connection, or once
    /// waiting for the connection has failed.
    pub async fn send_message(&self, text: impl Into<String>) -> SendOutcome {
        let text = text.into();
        self.request(|reply| Command::SendMessage { text, reply })
            .await
            .unwrap_or(SendOutcome::Failed {
                message_id: None,
                error: SendError::SessionClosed,
            })
    }

    pub async fn set_feedback(&self, message_id: MessageId, rating: Rating) {
        self.request(|reply| Command::SetFeedback {
            message_id,
            rating,
            reply,
        })
        .await;
    }

    pub async fn rename_current_room(&self, name: impl Into<String>) {
        let name = name.into();
        self.request(|reply| Command::RenameRoom {
            room_id: None,
            name,
            reply,
        })
        .await;
    }

    pub async fn rename_room(&self, room_id: RoomId, name: impl Into<String>) {
        let name = name.into();
        self.request(|reply| Command::RenameRoom {
            room_id: Some(room_id),
            name,
            reply,
        })
        .await;
    }

    pub async fn delete_room(&self, room_id: RoomId) {
        self.request(|reply| Command::DeleteRoom { room_id, reply })
            .await;
    }

    /// Close the connection and stop the session task.
    pub async fn shutdown(&self) {
        self.request(|reply| Command::Shutdown { reply }).await;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Option<T> {
        let (reply, reply_rx) = oneshot::channel();
        if self.commands.send(command(reply)).is_err() {
            tracing::warn!("Session task is not running");
            return None;
        }
        reply_rx.await.ok()
    }
}
