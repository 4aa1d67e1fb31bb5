use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle of a single connection handle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    ClosedWithError(String),
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// `Disconnected` and `ClosedWithError` end a handle's life.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected | ConnectionState::ClosedWithError(_)
        )
    }

    pub(crate) fn can_transition_to(&self, next: &ConnectionState) -> bool {
        match (self, next) {
            (ConnectionState::Connecting, ConnectionState::Open) => true,
            (ConnectionState::Connecting | ConnectionState::Open, next) => next.is_terminal(),
            _ => false,
        }
    }
}

/// Identity of one handle instance; events carry it so that events from a
/// superseded handle can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Event delivered by a handle to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub connection: ConnectionId,
    pub kind: ConnectionEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEventKind {
    Opened,
    Message(String),
    Failed(String),
    Closed,
}
