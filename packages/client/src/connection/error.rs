use std::time::Duration;

use thiserror::Error;

/// Connection-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// `send` was called before the handle reached `Open`
    #[error("Connection is not open")]
    NotOpen,

    /// The handle did not open within the allowed time
    #[error("Connection did not open within {0:?}")]
    Timeout(Duration),

    /// The underlying transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The handle was closed while the caller was waiting on it
    #[error("Connection was closed")]
    Cancelled,
}
