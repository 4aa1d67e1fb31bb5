//! Connection handle: one realtime transport bound to one room.
//!
//! A [`ConnectionHandle`] walks a small state machine
//! (`Connecting -> Open -> Disconnected | ClosedWithError`) held in a
//! `watch` channel. Terminal states are final; a new room or a reconnect
//! always gets a brand-new handle.

mod error;
mod handle;
mod state;
mod transport;
mod websocket;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ConnectionError;
pub use handle::ConnectionHandle;
pub use state::{ConnectionEvent, ConnectionEventKind, ConnectionId, ConnectionState};
pub use transport::{Connector, Transport, TransportEvent};
pub use websocket::{WebSocketConfig, WebSocketConnector};
