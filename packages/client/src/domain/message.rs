//! Chat message entity and its feedback annotation.

use std::fmt;

use uuid::Uuid;

use super::RoomId;

/// Locally generated message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Feedback currently attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Up,
    Down,
}

/// A user's up/down vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Up,
    Down,
}

impl Feedback {
    /// Apply a vote: repeating the current vote clears it, the other vote replaces it.
    pub fn toggled(self, rating: Rating) -> Feedback {
        match (self, rating) {
            (Feedback::Up, Rating::Up) | (Feedback::Down, Rating::Down) => Feedback::None,
            (_, Rating::Up) => Feedback::Up,
            (_, Rating::Down) => Feedback::Down,
        }
    }
}

/// One entry of the message log.
///
/// Everything but `feedback` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: i64,
    room_id: RoomId,
    feedback: Feedback,
}

impl ChatMessage {
    pub fn user(room_id: RoomId, content: impl Into<String>, timestamp: i64) -> Self {
        Self::new(Role::User, room_id, content.into(), timestamp)
    }

    pub fn assistant(room_id: RoomId, content: impl Into<String>, timestamp: i64) -> Self {
        Self::new(Role::Assistant, room_id, content.into(), timestamp)
    }

    fn new(role: Role, room_id: RoomId, content: String, timestamp: i64) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content,
            timestamp,
            room_id,
            feedback: Feedback::None,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub(super) fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = feedback;
    }
}
