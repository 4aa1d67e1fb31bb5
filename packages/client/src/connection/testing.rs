//! Scripted connector for driving connection handles from tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::RoomId;

use super::{ConnectionError, Connector, Transport, TransportEvent};

/// Connector whose connection attempts are answered by the test.
///
/// Every `connect` call shows up as a [`ConnectRequest`]; the attempt stays
/// pending for as long as the test holds the request without answering it.
pub(crate) struct ScriptedConnector {
    requests: mpsc::UnboundedSender<ConnectRequest>,
}

impl ScriptedConnector {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ConnectRequest>) {
        let (requests, requests_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { requests }), requests_rx)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, room_id: &RoomId) -> Result<Transport, ConnectionError> {
        let (reply, reply_rx) = oneshot::channel();
        self.requests
            .send(ConnectRequest {
                room_id: room_id.clone(),
                reply,
            })
            .map_err(|_| ConnectionError::Transport("test harness gone".to_string()))?;
        reply_rx
            .await
            .unwrap_or_else(|_| Err(ConnectionError::Transport("request dropped".to_string())))
    }
}

pub(crate) struct ConnectRequest {
    pub(crate) room_id: RoomId,
    reply: oneshot::Sender<Result<Transport, ConnectionError>>,
}

impl ConnectRequest {
    pub(crate) fn accept(self) -> RemoteEnd {
        let (outbound, sent) = mpsc::unbounded_channel();
        let (events, inbound) = mpsc::unbounded_channel();
        let _ = self.reply.send(Ok(Transport { outbound, inbound }));
        RemoteEnd { sent, events }
    }

    pub(crate) fn reject(self, reason: &str) {
        let _ = self
            .reply
            .send(Err(ConnectionError::Transport(reason.to_string())));
    }
}

/// The far side of an accepted transport.
pub(crate) struct RemoteEnd {
    sent: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl RemoteEnd {
    pub(crate) fn reply(&self, text: &str) {
        let _ = self.events.send(TransportEvent::Text(text.to_string()));
    }

    pub(crate) fn fail(&self, reason: &str) {
        let _ = self.events.send(TransportEvent::Error(reason.to_string()));
    }

    pub(crate) fn hang_up(&self) {
        let _ = self.events.send(TransportEvent::Closed);
    }

    pub(crate) async fn next_sent(&mut self) -> Option<String> {
        self.sent.recv().await
    }

    pub(crate) fn try_next_sent(&mut self) -> Option<String> {
        self.sent.try_recv().ok()
    }
}
