//! Transport abstraction beneath the connection handle.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::RoomId;

use super::ConnectionError;

/// Inbound traffic from a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Text(String),
    Error(String),
    Closed,
}

/// An established transport, seen as a pair of channels.
///
/// Dropping `outbound` asks the transport to close.
pub struct Transport {
    pub outbound: mpsc::UnboundedSender<String>,
    pub inbound: mpsc::UnboundedReceiver<TransportEvent>,
}

/// Establishes transports scoped to a room.
///
/// `connect` resolves once the transport is ready to carry messages, or fails.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, room_id: &RoomId) -> Result<Transport, ConnectionError>;
}
