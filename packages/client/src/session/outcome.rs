use thiserror::Error;

use crate::{connection::ConnectionError, directory::DirectoryError, domain::MessageId};

/// Why a send did not reach the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// No room existed and creating one failed
    #[error("Could not create a room: {0}")]
    Directory(#[from] DirectoryError),

    /// The connection never opened, failed, or was replaced
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The session task is gone
    #[error("Session is closed")]
    SessionClosed,
}

/// Result of [`SessionHandle::send_message`](super::SessionHandle::send_message).
///
/// A failed send keeps its optimistic message in the log; `message_id` is
/// `None` only when the message was never appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input
    Ignored,
    Sent(MessageId),
    Failed {
        message_id: Option<MessageId>,
        error: SendError,
    },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent(_))
    }
}
