//! Construction of shared clients and application state from configuration.

use dioxus_logger::tracing;
use oauth2::{basic::BasicClient, AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use tower_cookies::Key;

use crate::server::{
    config::{Config, DiscordConfig, COOKIE_SECRET_MIN_LEN},
    error::{config::ConfigError, AppError},
    state::{AppState, OAuth2Client},
};

/// Discord API base URL used when login is not configured.
const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api";

/// Builds the HTTP client shared by all outbound requests.
///
/// Redirects are disabled so a response from Discord or the panel can never send the
/// server to an arbitrary URL.
///
/// # Returns
/// - `Ok(reqwest::Client)` - The configured client
/// - `Err(AppError::ReqwestErr)` - The TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the Discord application.
///
/// Client credentials are sent in the form body of the token request.
///
/// # Arguments
/// - `config` - Discord application settings
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token and redirect URLs set
/// - `Err(ConfigError::InvalidEnvVar)` - One of the URLs does not parse
pub fn setup_oauth_client(config: &DiscordConfig) -> Result<OAuth2Client, ConfigError> {
    let auth_url = AuthUrl::new(config.auth_url.clone())
        .map_err(|e| invalid_url("DISCORD_AUTH_URL", e))?;
    let token_url = TokenUrl::new(config.token_url.clone())
        .map_err(|e| invalid_url("DISCORD_TOKEN_URL", e))?;
    let redirect_url = RedirectUrl::new(config.redirect_url.clone())
        .map_err(|e| invalid_url("DISCORD_REDIRECT_URI", e))?;

    let client = BasicClient::new(ClientId::new(config.client_id.clone()))
        .set_client_secret(ClientSecret::new(config.client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url)
        .set_auth_type(AuthType::RequestBody);

    Ok(client)
}

/// Derives the cookie signing key.
///
/// Without a configured secret a random key is generated, which invalidates every
/// issued cookie on restart.
///
/// # Arguments
/// - `secret` - Value of `COOKIE_SECRET`, already checked for length
///
/// # Returns
/// - `Ok(Key)` - Key derived from the secret, or a random one
/// - `Err(ConfigError::InvalidEnvVar)` - The secret is too short to derive a key from
pub fn setup_cookie_key(secret: Option<&str>) -> Result<Key, ConfigError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|_| ConfigError::InvalidEnvVar {
            name: "COOKIE_SECRET".to_string(),
            reason: format!("must be at least {} bytes", COOKIE_SECRET_MIN_LEN),
        }),
        None => {
            tracing::warn!(
                "COOKIE_SECRET is not set, using a random key; logins will not survive a restart"
            );
            Ok(Key::generate())
        }
    }
}

/// Assembles the application state.
///
/// Disabled features are logged so a misconfigured deployment is visible at startup.
///
/// # Arguments
/// - `config` - Configuration read from the environment
/// - `http_client` - Shared HTTP client
///
/// # Returns
/// - `Ok(AppState)` - State ready to be attached to the router
/// - `Err(AppError::ConfigErr)` - OAuth URLs or cookie secret are unusable
pub fn setup_state(config: Config, http_client: reqwest::Client) -> Result<AppState, AppError> {
    let (oauth_client, discord_api_url) = match &config.discord {
        Some(discord) => (Some(setup_oauth_client(discord)?), discord.api_url.clone()),
        None => {
            tracing::warn!("Discord OAuth2 is not configured, login is disabled");
            (None, DEFAULT_DISCORD_API_URL.to_string())
        }
    };

    if config.panel.is_none() {
        tracing::warn!("Panel API is not configured, server provisioning is disabled");
    }

    let cookie_key = setup_cookie_key(config.cookie_secret.as_deref())?;

    Ok(AppState {
        http_client,
        oauth_client,
        discord_api_url,
        panel: config.panel,
        cookie_key,
    })
}

fn invalid_url(name: &str, err: oauth2::url::ParseError) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
    }
}
