//! Ordered per-room message log.

use thiserror::Error;

use super::{ChatMessage, Feedback, MessageId, Rating, Role, RoomId};

/// Returned when a message is appended to a log owned by another room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("message for room {message_room} does not belong to log of room {log_room:?}")]
pub struct ForeignMessage {
    pub message_room: RoomId,
    pub log_room: Option<RoomId>,
}

/// Append-only message sequence bound to one room.
///
/// A log without an owning room is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    room_id: Option<RoomId>,
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn for_room(room_id: Option<RoomId>) -> Self {
        Self {
            room_id,
            messages: Vec::new(),
        }
    }

    /// Append in local arrival order.
    pub fn push(&mut self, message: ChatMessage) -> Result<(), ForeignMessage> {
        if self.room_id.as_ref() != Some(message.room_id()) {
            return Err(ForeignMessage {
                message_room: message.room_id().clone(),
                log_room: self.room_id.clone(),
            });
        }
        self.messages.push(message);
        Ok(())
    }

    /// Apply a vote to an assistant message.
    ///
    /// Returns the resulting feedback, or `None` when the id is unknown or
    /// names a user message.
    pub fn set_feedback(&mut self, id: MessageId, rating: Rating) -> Option<Feedback> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id() == id && m.role() == Role::Assistant)?;
        let next = message.feedback().toggled(rating);
        message.set_feedback(next);
        Some(next)
    }

    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }
}
