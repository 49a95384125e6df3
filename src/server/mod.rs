//! Server-side API backend and provisioning logic.
//!
//! This module contains the backend of the application: the Discord OAuth2 login flow,
//! the identity cookie, and the orchestration that provisions a bot hosting server on a
//! Pterodactyl-compatible panel. The backend uses Axum as the web framework, the `oauth2`
//! crate for the Discord authorization code flow, and reqwest for every outbound call.
//! Nothing is persisted locally: the identity lives in a signed cookie and every other
//! record is owned by Discord or the panel.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - OAuth login and server provisioning orchestration
//! - **Data Layer** (`data/`) - Repositories over the panel's application API
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Identity cookie access and the auth guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration, read once at startup
//! - **State** (`state`) - Shared application state (HTTP client, OAuth client, cookie key)
//! - **Startup** (`startup`) - Construction of clients and state from configuration
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Controller** reads the identity cookie through the auth guard
//! 3. **Controller** converts the request DTO into operation params, calls service
//! 4. **Service** runs the workflow against Discord or the panel via repositories
//! 5. **Controller** converts the result to a DTO or redirect
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
