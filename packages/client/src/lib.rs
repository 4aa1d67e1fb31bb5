//! Kaiwa client: a realtime chat session manager.
//!
//! - [`domain`]: rooms, messages and the per-room message log
//! - [`directory`]: room CRUD against the request/response service
//! - [`connection`]: one streaming connection bound to one room
//! - [`session`]: the state machine tying them together
//! - [`ui`]: terminal front end used by the `kaiwa-client` binary

pub mod connection;
pub mod directory;
pub mod domain;
pub mod session;
pub mod ui;
