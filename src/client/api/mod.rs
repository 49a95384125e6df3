#[cfg(feature = "web")]
pub mod helper;

#[cfg(feature = "web")]
pub mod server;

#[cfg(feature = "web")]
pub mod user;
