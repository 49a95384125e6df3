//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - HTTP client for Discord and panel API requests
//! - OAuth2 client for Discord authentication, when configured
//! - Panel connection settings, when configured
//! - Key used to sign and verify cookies

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use tower_cookies::Key;

use crate::server::config::PanelConfig;

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `Key` is a fixed-size byte array
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for making external API requests.
    ///
    /// Configured with no redirects to prevent SSRF vulnerabilities. Used for the token
    /// exchange, the Discord profile fetch and every panel call.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    ///
    /// `None` when the Discord application is not configured; login then fails with a
    /// configuration error.
    pub oauth_client: Option<OAuth2Client>,

    /// Discord REST API base URL used to fetch the logged in user's profile.
    pub discord_api_url: String,

    /// Panel connection settings.
    ///
    /// `None` when the panel is not configured; provisioning then fails with a
    /// configuration error.
    pub panel: Option<PanelConfig>,

    /// Master key for signed cookies.
    pub cookie_key: Key,
}
