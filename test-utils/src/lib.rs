//! Bothost Test Utils
//!
//! Provides shared testing utilities for exercising the bothost backend against fake
//! upstream services. Both upstreams the backend talks to, Discord's OAuth2 endpoints and
//! the hosting panel's application API, are replaced by small axum servers bound to an
//! ephemeral local port.
//!
//! # Overview
//!
//! - **MockDiscord**: token exchange and `users/@me` endpoints
//! - **MockPanel**: users, nodes, allocations and servers, recording every call
//! - **fixture**: canned Discord profile payloads
//! - **server::spawn**: serves any axum router on `127.0.0.1:0`
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::panel::MockPanel;
//!
//! #[tokio::test]
//! async fn provisions_on_first_node() -> Result<(), TestError> {
//!     let panel = MockPanel::builder()
//!         .with_node(1, &[(10, false)])
//!         .build()
//!         .await?;
//!
//!     // Point the panel client at `panel.url` ...
//!
//!     assert_eq!(panel.server_requests().await.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod discord;
pub mod error;
pub mod fixture;
pub mod panel;
pub mod server;
