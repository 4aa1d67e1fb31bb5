//! Data Transfer Objects for the HTTP API.

pub mod http;
