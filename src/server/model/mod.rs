//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer. Panel resources
//! are decoded into these models at the repository boundary and identities are converted
//! to DTOs at the controller boundary. Parameter types describe the payloads sent to the
//! panel when provisioning.

pub mod identity;
pub mod panel;
pub mod provision;
