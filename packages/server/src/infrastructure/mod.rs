//! Infrastructure layer: concrete implementations of the domain ports and wire DTOs.

pub mod dto;
pub mod repository;
pub mod responder;
