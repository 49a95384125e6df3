//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Login**: Driving the Discord OAuth2 authorization code flow
//! - **Orchestration**: Coordinating the panel repositories to provision a server
//! - **Domain Models**: Working with domain models rather than DTOs or panel payloads

pub mod auth;
pub mod provision;

#[cfg(test)]
mod test;
