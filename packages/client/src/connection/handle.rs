use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::sync::{mpsc, watch};

use crate::domain::RoomId;

use super::{
    ConnectionError, ConnectionEvent, ConnectionEventKind, ConnectionId, ConnectionState,
    Connector, Transport, TransportEvent,
};

/// Owner-side handle of one transport bound to one room.
///
/// The background task owns the transport; the handle owns the state.
/// Closing the handle (explicitly or by dropping it) moves the state to
/// `Disconnected`, which the task observes and stops forwarding events.
pub struct ConnectionHandle {
    id: ConnectionId,
    room_id: RoomId,
    state: Arc<watch::Sender<ConnectionState>>,
    closed_locally: Arc<AtomicBool>,
    outbound: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    /// Start connecting to `room_id`. Events are tagged with this handle's id.
    pub fn open(
        connector: Arc<dyn Connector>,
        room_id: RoomId,
        events: mpsc::UnboundedSender<ConnectionEvent>,
    ) -> Self {
        let id = ConnectionId::next();
        let (state, _) = watch::channel(ConnectionState::Connecting);
        let state = Arc::new(state);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();

        tracing::debug!("Opening connection {:?} for room {}", id, room_id);
        tokio::spawn(run_connection(
            ConnectionTask {
                id,
                room_id: room_id.clone(),
                state: state.clone(),
                events,
            },
            connector,
            outbound_rx,
        ));

        Self {
            id,
            room_id,
            state,
            closed_locally: Arc::new(AtomicBool::new(false)),
            outbound,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    /// Transmit a payload. The handle never buffers: it must be `Open`.
    pub fn send(&self, payload: String) -> Result<(), ConnectionError> {
        if !self.is_open() {
            return Err(ConnectionError::NotOpen);
        }
        self.outbound
            .send(payload)
            .map_err(|_| ConnectionError::Transport("connection task stopped".to_string()))
    }

    /// Wait until the handle leaves `Connecting`.
    ///
    /// The returned future does not borrow the handle, so it can be awaited
    /// on another task while the owner keeps working. It resolves
    /// `Cancelled` only when this handle was closed; a remote hang-up is a
    /// transport error.
    pub fn await_open(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), ConnectionError>> + Send + 'static {
        let mut state_rx = self.state.subscribe();
        let closed_locally = self.closed_locally.clone();
        async move {
            let settled = async move {
                let state = state_rx
                    .wait_for(|s| !matches!(s, ConnectionState::Connecting))
                    .await
                    .map(|s| (*s).clone());
                match state {
                    Ok(ConnectionState::Open) => Ok(()),
                    Ok(ConnectionState::ClosedWithError(reason)) => {
                        Err(ConnectionError::Transport(reason))
                    }
                    Ok(ConnectionState::Disconnected)
                        if !closed_locally.load(Ordering::Acquire) =>
                    {
                        Err(ConnectionError::Transport("connection closed".to_string()))
                    }
                    _ => Err(ConnectionError::Cancelled),
                }
            };
            tokio::time::timeout(timeout, settled)
                .await
                .unwrap_or(Err(ConnectionError::Timeout(timeout)))
        }
    }

    /// Close the handle. Idempotent.
    pub fn close(&self) {
        self.closed_locally.store(true, Ordering::Release);
        if transition(&self.state, ConnectionState::Disconnected) {
            tracing::debug!("Connection {:?} for room {} closed", self.id, self.room_id);
        }
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.close();
    }
}

fn transition(state: &watch::Sender<ConnectionState>, next: ConnectionState) -> bool {
    state.send_if_modified(|current| {
        if current.can_transition_to(&next) {
            *current = next;
            true
        } else {
            false
        }
    })
}

struct ConnectionTask {
    id: ConnectionId,
    room_id: RoomId,
    state: Arc<watch::Sender<ConnectionState>>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
}

impl ConnectionTask {
    fn emit(&self, kind: ConnectionEventKind) {
        let _ = self.events.send(ConnectionEvent {
            connection: self.id,
            kind,
        });
    }

    /// Move to `next` and report it; nothing is reported once the handle is closed.
    fn settle(&self, next: ConnectionState, kind: ConnectionEventKind) {
        if transition(&self.state, next) {
            self.emit(kind);
        }
    }
}

async fn closed(state_rx: &mut watch::Receiver<ConnectionState>) {
    let _ = state_rx.wait_for(ConnectionState::is_terminal).await;
}

async fn run_connection(
    task: ConnectionTask,
    connector: Arc<dyn Connector>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
) {
    let mut state_rx = task.state.subscribe();

    let connected = tokio::select! {
        result = connector.connect(&task.room_id) => result,
        _ = closed(&mut state_rx) => {
            tracing::debug!("Connection {:?} closed while connecting", task.id);
            return;
        }
    };

    let Transport {
        outbound,
        mut inbound,
    } = match connected {
        Ok(transport) => transport,
        Err(e) => {
            tracing::warn!("Failed to connect to room {}: {}", task.room_id, e);
            task.settle(
                ConnectionState::ClosedWithError(e.to_string()),
                ConnectionEventKind::Failed(e.to_string()),
            );
            return;
        }
    };

    task.settle(ConnectionState::Open, ConnectionEventKind::Opened);
    tracing::info!("Connected to room {}", task.room_id);

    loop {
        tokio::select! {
            _ = closed(&mut state_rx) => break,
            payload = outbound_rx.recv() => match payload {
                Some(payload) => {
                    if outbound.send(payload).is_err() {
                        task.settle(
                            ConnectionState::ClosedWithError("transport writer stopped".to_string()),
                            ConnectionEventKind::Failed("transport writer stopped".to_string()),
                        );
                        break;
                    }
                }
                None => break,
            },
            event = inbound.recv() => match event {
                Some(TransportEvent::Text(text)) => {
                    if task.state.borrow().is_open() {
                        task.emit(ConnectionEventKind::Message(text));
                    }
                }
                Some(TransportEvent::Error(reason)) => {
                    tracing::warn!("Transport error on room {}: {}", task.room_id, reason);
                    task.settle(
                        ConnectionState::ClosedWithError(reason.clone()),
                        ConnectionEventKind::Failed(reason),
                    );
                    break;
                }
                Some(TransportEvent::Closed) | None => {
                    tracing::info!("Transport for room {} closed", task.room_id);
                    task.settle(ConnectionState::Disconnected, ConnectionEventKind::Closed);
                    break;
                }
            },
        }
    }
    // Dropping `outbound` closes the transport.
}
