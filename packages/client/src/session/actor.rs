//! Session actor: the single writer of [`SessionState`].
//!
//! Commands, connection events and internal timers are handled one at a time,
//! each to completion. The only long wait a caller can observe, a send waiting
//! for its connection to open, runs on a spawned waiter that reports back
//! through the inbox, so a room switch is processed while sends are pending.

use std::ops::ControlFlow;

use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    connection::{
        ConnectionError, ConnectionEvent, ConnectionEventKind, ConnectionHandle, ConnectionId,
        ConnectionState,
    },
    directory::DirectoryError,
    domain::{ChatMessage, MessageId, MessageLog, Rating, Room, RoomId, sort_newest_first},
};

use super::{
    SendError, SendOutcome, SessionConfig, SessionDeps,
    state::{Notification, PendingSend, SessionSnapshot, SessionState},
};

const SEND_FAILED: &str = "Failed to send message.";

pub(super) enum Command {
    Initialize {
        reply: oneshot::Sender<()>,
    },
    SelectRoom {
        room: Option<Room>,
        reply: oneshot::Sender<()>,
    },
    CreateRoom {
        reply: oneshot::Sender<()>,
    },
    SendMessage {
        text: String,
        reply: oneshot::Sender<SendOutcome>,
    },
    SetFeedback {
        message_id: MessageId,
        rating: Rating,
        reply: oneshot::Sender<()>,
    },
    /// `room_id: None` renames the current room
    RenameRoom {
        room_id: Option<RoomId>,
        name: String,
        reply: oneshot::Sender<()>,
    },
    DeleteRoom {
        room_id: RoomId,
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

enum Internal {
    /// A waiter spawned by `send_message` saw its connection settle
    OpenSettled {
        connection: ConnectionId,
        message_id: MessageId,
        result: Result<(), ConnectionError>,
    },
    NotificationExpired(u64),
}

/// Caller replies, delivered after the snapshot reflecting them is published.
enum Reply {
    Done(oneshot::Sender<()>),
    Send(oneshot::Sender<SendOutcome>, SendOutcome),
}

pub(super) struct Inbox {
    connection: mpsc::UnboundedReceiver<ConnectionEvent>,
    internal: mpsc::UnboundedReceiver<Internal>,
}

pub(super) struct SessionActor {
    state: SessionState,
    rooms: Vec<Room>,
    notification: Option<Notification>,
    notification_seq: u64,
    connection: Option<ConnectionHandle>,
    deps: SessionDeps,
    config: SessionConfig,
    connection_tx: mpsc::UnboundedSender<ConnectionEvent>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    snapshots: watch::Sender<SessionSnapshot>,
    replies: Vec<Reply>,
}

impl SessionActor {
    pub(super) fn new(
        deps: SessionDeps,
        config: SessionConfig,
        snapshots: watch::Sender<SessionSnapshot>,
    ) -> (Self, Inbox) {
        let (connection_tx, connection) = mpsc::unbounded_channel();
        let (internal_tx, internal) = mpsc::unbounded_channel();
        let actor = Self {
            state: SessionState::default(),
            rooms: Vec::new(),
            notification: None,
            notification_seq: 0,
            connection: None,
            deps,
            config,
            connection_tx,
            internal_tx,
            snapshots,
            replies: Vec::new(),
        };
        (
            actor,
            Inbox {
                connection,
                internal,
            },
        )
    }

    pub(super) async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>, mut inbox: Inbox) {
        tracing::debug!("Session started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        if let ControlFlow::Break(reply) = self.handle_command(command).await {
                            self.teardown();
                            self.deliver_replies();
                            let _ = reply.send(());
                            return;
                        }
                    }
                    None => break,
                },
                Some(event) = inbox.connection.recv() => self.on_connection_event(event),
                Some(event) = inbox.internal.recv() => self.on_internal_event(event),
            }
            self.publish();
            self.deliver_replies();
        }
        self.teardown();
        self.deliver_replies();
    }

    async fn handle_command(&mut self, command: Command) -> ControlFlow<oneshot::Sender<()>> {
        match command {
            Command::Initialize { reply } => {
                self.initialize().await;
                self.replies.push(Reply::Done(reply));
            }
            Command::SelectRoom { room, reply } => {
                self.select_room(room);
                self.replies.push(Reply::Done(reply));
            }
            Command::CreateRoom { reply } => {
                if let Err(e) = self.create_and_select().await {
                    tracing::warn!("Failed to create room: {}", e);
                    self.notify("Failed to create room.");
                }
                self.replies.push(Reply::Done(reply));
            }
            Command::SendMessage { text, reply } => self.send_message(text, reply).await,
            Command::SetFeedback {
                message_id,
                rating,
                reply,
            } => {
                match self.state.messages.set_feedback(message_id, rating) {
                    Some(feedback) => tracing::debug!("Feedback on {} is now {:?}", message_id, feedback),
                    None => tracing::debug!("Ignoring feedback for message {}", message_id),
                }
                self.replies.push(Reply::Done(reply));
            }
            Command::RenameRoom {
                room_id,
                name,
                reply,
            } => {
                self.rename_room(room_id, &name).await;
                self.replies.push(Reply::Done(reply));
            }
            Command::DeleteRoom { room_id, reply } => {
                self.delete_room(room_id).await;
                self.replies.push(Reply::Done(reply));
            }
            Command::Shutdown { reply } => return ControlFlow::Break(reply),
        }
        ControlFlow::Continue(())
    }

    async fn initialize(&mut self) {
        match self.deps.directory.list_rooms().await {
            Ok(rooms) if rooms.is_empty() => {
                tracing::info!("No rooms yet, creating one");
                if let Err(e) = self.create_and_select().await {
                    tracing::warn!("Failed to create initial room: {}", e);
                    self.notify("Failed to load chat rooms.");
                }
            }
            Ok(mut rooms) => {
                sort_newest_first(&mut rooms);
                let newest = rooms.first().cloned();
                self.rooms = rooms;
                self.select_room(newest);
            }
            Err(e) => {
                tracing::warn!("Failed to list rooms: {}", e);
                self.notify("Failed to load chat rooms.");
            }
        }
    }

    async fn create_and_select(&mut self) -> Result<Room, DirectoryError> {
        let name = self.deps.names.generate();
        let room = self.deps.directory.create_room(&name).await?;
        tracing::info!("Room '{}' ({}) created", room.name, room.id);
        self.rooms.insert(0, room.clone());
        self.select_room(Some(room.clone()));
        Ok(room)
    }

    /// Switch rooms: close the old connection, reset the log, open a new one.
    ///
    /// Re-selecting the current room only refreshes its name, unless its
    /// connection has died, in which case the room is reconnected and the
    /// log kept.
    fn select_room(&mut self, room: Option<Room>) {
        let next_id = room.as_ref().map(|r| r.id.clone());
        if self.state.current_room_id() == next_id.as_ref() {
            let dead = self
                .connection
                .as_ref()
                .is_some_and(|c| c.state().is_terminal());
            self.state.current_room = room;
            if dead {
                tracing::info!("Reconnecting to room {:?}", next_id);
                self.replace_connection();
            }
            return;
        }

        tracing::info!("Switching room {:?} -> {:?}", self.state.current_room_id(), next_id);
        self.state.current_room = room;
        self.state.messages = MessageLog::for_room(next_id);
        self.replace_connection();
    }

    fn replace_connection(&mut self) {
        if let Some(previous) = self.connection.take() {
            previous.close();
        }
        self.fail_pending(ConnectionError::Cancelled);
        self.state.connection = ConnectionState::Disconnected;

        if let Some(room) = &self.state.current_room {
            let handle = ConnectionHandle::open(
                self.deps.connector.clone(),
                room.id.clone(),
                self.connection_tx.clone(),
            );
            self.state.connection = handle.state();
            self.connection = Some(handle);
        }
    }

    async fn send_message(&mut self, text: String, reply: oneshot::Sender<SendOutcome>) {
        if text.trim().is_empty() {
            self.reply_send(reply, SendOutcome::Ignored);
            return;
        }

        if self.state.current_room.is_none() {
            if let Err(e) = self.create_and_select().await {
                tracing::warn!("Failed to create room for message: {}", e);
                self.notify("Failed to create room.");
                self.reply_send(
                    reply,
                    SendOutcome::Failed {
                        message_id: None,
                        error: SendError::Directory(e),
                    },
                );
                return;
            }
        }

        let (Some(room_id), Some(connection)) =
            (self.state.current_room_id().cloned(), self.connection.as_ref())
        else {
            self.reply_send(
                reply,
                SendOutcome::Failed {
                    message_id: None,
                    error: SendError::Connection(ConnectionError::NotOpen),
                },
            );
            return;
        };

        let message = ChatMessage::user(room_id, text.clone(), self.deps.clock.now_millis());
        let message_id = message.id();

        if connection.is_open() {
            self.append(message);
            self.flush_pending();
            let outcome = self.transmit(message_id, text);
            self.reply_send(reply, outcome);
            return;
        }

        let settled = connection.await_open(self.config.open_timeout);
        let connection_id = connection.id();
        self.append(message);
        self.state.pending_outbound.push_back(PendingSend {
            connection: connection_id,
            message_id,
            payload: text,
            reply,
        });

        let internal = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = settled.await;
            let _ = internal.send(Internal::OpenSettled {
                connection: connection_id,
                message_id,
                result,
            });
        });
    }

    fn append(&mut self, message: ChatMessage) {
        if let Err(e) = self.state.messages.push(message) {
            tracing::error!("Dropping message: {}", e);
        }
    }

    fn transmit(&mut self, message_id: MessageId, payload: String) -> SendOutcome {
        let result = match &self.connection {
            Some(connection) => connection.send(payload),
            None => Err(ConnectionError::NotOpen),
        };
        match result {
            Ok(()) => SendOutcome::Sent(message_id),
            Err(e) => {
                tracing::warn!("Message {} not sent: {}", message_id, e);
                self.notify(SEND_FAILED);
                SendOutcome::Failed {
                    message_id: Some(message_id),
                    error: SendError::Connection(e),
                }
            }
        }
    }

    /// Transmit queued sends in the order they were issued.
    fn flush_pending(&mut self) {
        let pending: Vec<PendingSend> = self.state.pending_outbound.drain(..).collect();
        for PendingSend {
            message_id,
            payload,
            reply,
            ..
        } in pending
        {
            let outcome = self.transmit(message_id, payload);
            self.reply_send(reply, outcome);
        }
    }

    fn fail_pending(&mut self, error: ConnectionError) {
        if self.state.pending_outbound.is_empty() {
            return;
        }
        let pending: Vec<PendingSend> = self.state.pending_outbound.drain(..).collect();
        let count = pending.len();
        for PendingSend {
            message_id, reply, ..
        } in pending
        {
            let outcome = SendOutcome::Failed {
                message_id: Some(message_id),
                error: SendError::Connection(error.clone()),
            };
            self.reply_send(reply, outcome);
        }
        tracing::warn!("{} pending message(s) not sent: {}", count, error);
        self.notify(SEND_FAILED);
    }

    fn on_connection_event(&mut self, event: ConnectionEvent) {
        if self.connection.as_ref().map(ConnectionHandle::id) != Some(event.connection) {
            tracing::debug!("Dropping event from superseded connection {:?}", event.connection);
            return;
        }

        match event.kind {
            ConnectionEventKind::Opened => {
                self.state.connection = ConnectionState::Open;
                self.flush_pending();
            }
            ConnectionEventKind::Message(text) => {
                let Some(room_id) = self.state.current_room_id().cloned() else {
                    return;
                };
                let message = ChatMessage::assistant(room_id, text, self.deps.clock.now_millis());
                self.append(message);
            }
            ConnectionEventKind::Failed(reason) => {
                self.state.connection = ConnectionState::ClosedWithError(reason.clone());
                self.fail_pending(ConnectionError::Transport(reason));
                self.notify("Disconnected from chat server.");
            }
            ConnectionEventKind::Closed => {
                self.state.connection = ConnectionState::Disconnected;
                self.fail_pending(ConnectionError::Transport("connection closed".to_string()));
            }
        }
    }

    fn on_internal_event(&mut self, event: Internal) {
        match event {
            Internal::OpenSettled {
                connection,
                message_id,
                result: Ok(()),
            } => {
                let current = self.connection.as_ref().filter(|c| c.id() == connection);
                if let Some(handle) = current {
                    tracing::debug!("Connection open for message {}", message_id);
                    self.state.connection = handle.state();
                    self.flush_pending();
                }
            }
            Internal::OpenSettled {
                connection,
                message_id,
                result: Err(error),
            } => {
                let position = self
                    .state
                    .pending_outbound
                    .iter()
                    .position(|p| p.message_id == message_id && p.connection == connection);
                if let Some(pending) = position.and_then(|i| self.state.pending_outbound.remove(i)) {
                    tracing::warn!("Message {} not sent: {}", message_id, error);
                    self.reply_send(
                        pending.reply,
                        SendOutcome::Failed {
                            message_id: Some(message_id),
                            error: SendError::Connection(error),
                        },
                    );
                    self.notify(SEND_FAILED);
                }
            }
            Internal::NotificationExpired(id) => {
                if self.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.notification = None;
                }
            }
        }
    }

    async fn rename_room(&mut self, room_id: Option<RoomId>, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Ignoring empty room name");
            return;
        }
        let Some(room_id) = room_id.or_else(|| self.state.current_room_id().cloned()) else {
            return;
        };

        match self.deps.directory.rename_room(&room_id, name).await {
            Ok(updated) => {
                tracing::info!("Room {} renamed to '{}'", room_id, updated.name);
                for room in self.rooms.iter_mut().filter(|r| r.id == room_id) {
                    room.name = updated.name.clone();
                }
                if let Some(current) = self.state.current_room.as_mut().filter(|r| r.id == room_id) {
                    current.name = updated.name;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to rename room {}: {}", room_id, e);
                self.notify("Failed to rename room.");
            }
        }
    }

    async fn delete_room(&mut self, room_id: RoomId) {
        match self.deps.directory.delete_room(&room_id).await {
            Ok(()) => {
                tracing::info!("Room {} deleted", room_id);
                self.rooms.retain(|r| r.id != room_id);
                if self.state.current_room_id() == Some(&room_id) {
                    self.select_room(None);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to delete room {}: {}", room_id, e);
                self.notify("Failed to delete room.");
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.notification_seq += 1;
        let id = self.notification_seq;
        self.notification = Some(Notification {
            id,
            message: message.to_string(),
        });

        let internal = self.internal_tx.clone();
        let ttl = self.config.notification_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = internal.send(Internal::NotificationExpired(id));
        });
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_room: self.state.current_room.clone(),
            rooms: self.rooms.clone(),
            messages: self.state.messages.to_vec(),
            connection: self.state.connection.clone(),
            pending_outbound: self.state.pending_outbound.len(),
            notification: self.notification.clone(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    fn reply_send(&mut self, reply: oneshot::Sender<SendOutcome>, outcome: SendOutcome) {
        self.replies.push(Reply::Send(reply, outcome));
    }

    fn deliver_replies(&mut self) {
        // A caller may have stopped waiting; the effect is in the snapshot regardless.
        for reply in self.replies.drain(..) {
            let _ = match reply {
                Reply::Done(reply) => reply.send(()),
                Reply::Send(reply, outcome) => reply.send(outcome).map_err(|_| ()),
            };
        }
    }

    fn teardown(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
        self.fail_pending(ConnectionError::Cancelled);
        self.state.connection = ConnectionState::Disconnected;
        self.publish();
        tracing::debug!("Session stopped");
    }
}
