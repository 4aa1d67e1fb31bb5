//! Domain layer: room entity, value objects and the ports the usecases depend on.

mod entity;
mod error;
mod repository;
mod responder;
mod value_object;

pub use entity::Room;
pub use error::{RepositoryError, ValidationError};
pub use repository::RoomRepository;
pub use responder::Responder;
pub use value_object::{Owner, RoomId, RoomName};

#[cfg(test)]
pub use repository::MockRoomRepository;
#[cfg(test)]
pub use responder::MockResponder;
