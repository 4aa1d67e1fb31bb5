//! Domain model of a chat session: rooms, messages and the per-room message log.

mod log;
mod message;
mod naming;
mod room;

pub use log::{ForeignMessage, MessageLog};
pub use message::{ChatMessage, Feedback, MessageId, Rating, Role};
pub use naming::{RandomRoomNames, RoomNameGenerator};
pub use room::{Room, RoomId};

pub(crate) use room::sort_newest_first;
