//! DTOs shared between the server API and the web client.

pub mod api;
pub mod server;
pub mod user;
