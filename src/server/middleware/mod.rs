//! Cookie-backed identity handling shared by the controllers.

pub mod auth;
pub mod session;
