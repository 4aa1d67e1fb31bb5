//! Kaiwa chat server library.
//!
//! Reference implementation of the two services a Kaiwa client talks to: a
//! room directory over HTTP and a per-room chat socket over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
