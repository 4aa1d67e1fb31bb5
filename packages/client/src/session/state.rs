use std::collections::VecDeque;

use tokio::sync::oneshot;

use crate::{
    connection::{ConnectionId, ConnectionState},
    domain::{ChatMessage, MessageId, MessageLog, Room, RoomId},
};

use super::SendOutcome;

/// Transient, auto-dismissing user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
}

/// Read-only view of the session published after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_room: Option<Room>,
    pub rooms: Vec<Room>,
    pub messages: Vec<ChatMessage>,
    pub connection: ConnectionState,
    pub pending_outbound: usize,
    pub notification: Option<Notification>,
}

/// A send waiting for its connection to open.
pub(super) struct PendingSend {
    pub(super) connection: ConnectionId,
    pub(super) message_id: MessageId,
    pub(super) payload: String,
    pub(super) reply: oneshot::Sender<SendOutcome>,
}

/// Authoritative session model.
///
/// `current_room == None` implies an empty log, no pending sends and
/// `Disconnected`; otherwise every logged message belongs to `current_room`.
#[derive(Default)]
pub(super) struct SessionState {
    pub(super) current_room: Option<Room>,
    pub(super) messages: MessageLog,
    pub(super) connection: ConnectionState,
    pub(super) pending_outbound: VecDeque<PendingSend>,
}

impl SessionState {
    pub(super) fn current_room_id(&self) -> Option<&RoomId> {
        self.current_room.as_ref().map(|room| &room.id)
    }
}
