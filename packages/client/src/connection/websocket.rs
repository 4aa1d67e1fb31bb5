//! WebSocket transport built on tokio-tungstenite.
//!
//! The room id is part of the connection target:
//! `{base_url}/ws/chat/{room_id}/{username}`.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::domain::RoomId;

use super::{ConnectionError, Connector, Transport, TransportEvent};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WebSocketConfig {
    /// e.g. `ws://127.0.0.1:8000`
    pub base_url: String,
    pub username: String,
    pub connect_timeout: Duration,
}

impl WebSocketConfig {
    pub fn new(base_url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Connection target for `room_id`. Room id and username are
    /// percent-encoded as single path segments.
    pub fn room_url(&self, room_id: &RoomId) -> Result<String, ConnectionError> {
        let invalid = || ConnectionError::Transport(format!("invalid base URL {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["ws", "chat", room_id.as_str(), self.username.as_str()]);
        Ok(url.into())
    }
}

pub struct WebSocketConnector {
    config: WebSocketConfig,
}

impl WebSocketConnector {
    pub fn new(config: WebSocketConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, room_id: &RoomId) -> Result<Transport, ConnectionError> {
        let url = self.config.room_url(room_id)?;
        tracing::debug!("Connecting to {}", url);

        let (ws_stream, _response) =
            match tokio::time::timeout(self.config.connect_timeout, connect_async(&url)).await {
                Ok(Ok(connected)) => connected,
                Ok(Err(e)) => return Err(ConnectionError::Transport(e.to_string())),
                Err(_) => return Err(ConnectionError::Timeout(self.config.connect_timeout)),
            };

        let (mut write, mut read) = ws_stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (inbound_tx, inbound) = mpsc::unbounded_channel();

        // Writer: runs until the handle drops `outbound`, then says goodbye.
        tokio::spawn(async move {
            while let Some(payload) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(payload.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    break;
                }
            }
            let _ = write.send(Message::Close(None)).await;
        });

        // Reader
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                let event = match message {
                    Ok(Message::Text(text)) => TransportEvent::Text(text.as_str().to_owned()),
                    Ok(Message::Close(_)) => TransportEvent::Closed,
                    Ok(_) => continue,
                    Err(e) => TransportEvent::Error(e.to_string()),
                };
                let last = !matches!(event, TransportEvent::Text(_));
                if inbound_tx.send(event).is_err() || last {
                    return;
                }
            }
            let _ = inbound_tx.send(TransportEvent::Closed);
        });

        Ok(Transport { outbound, inbound })
    }
}
