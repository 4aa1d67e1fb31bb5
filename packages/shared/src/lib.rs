//! Utilities shared by the Kaiwa client and server.

pub mod logger;
pub mod time;
