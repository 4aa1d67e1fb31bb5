use thiserror::Error;

/// Room directory failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The room does not exist (or is not visible to the caller)
    #[error("Room not found: {0}")]
    NotFound(String),

    /// The directory rejected the input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Any other status or an unreadable body
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
