//! HTTP request handlers.
//!
//! Controllers extract request data, check the identity cookie through the auth guard,
//! call into the service layer and convert results into DTOs, redirects or error
//! responses. Every handler carries OpenAPI metadata picked up by the router.

pub mod auth;
pub mod server;
pub mod user;

#[cfg(test)]
mod test;
