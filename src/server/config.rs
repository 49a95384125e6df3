//! Environment-based application configuration.
//!
//! Configuration is read once at startup into [`Config`] and handed to
//! [`crate::server::startup::setup_state`]; request handlers never touch the environment.
//! Optional sections (Discord, panel) are `None` when their variables are absent, which
//! keeps the server running and lets the affected endpoints answer with a configuration
//! error instead.

use dioxus_logger::tracing;
use url::Url;

use crate::server::error::config::ConfigError;

const DISCORD_AUTH_URL: &str = "https://discord.com/api/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api";

const DEFAULT_EGG_ID: u32 = 16;
const DEFAULT_DOCKER_IMAGE: &str = "ghcr.io/parkervcp/yolks:python_3.12";

/// Minimum length of `COOKIE_SECRET`, the size of a cookie signing master key.
pub const COOKIE_SECRET_MIN_LEN: usize = 64;

/// Discord OAuth2 application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,

    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

/// Hosting panel application API settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Panel base URL without trailing slash.
    pub url: String,
    pub api_key: String,
    /// Egg the bot servers are created from.
    pub egg_id: u32,
    pub docker_image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub discord: Option<DiscordConfig>,
    pub panel: Option<PanelConfig>,
    /// Master key material for signing cookies.
    pub cookie_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration with optional sections resolved
    /// - `Err(ConfigError::InvalidEnvVar)` - A present variable holds an unusable value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Ok(Self {
            discord: discord_from_lookup(&var)?,
            panel: panel_from_lookup(&var)?,
            cookie_secret: cookie_secret_from_lookup(&var)?,
        })
    }
}

fn discord_from_lookup<F>(var: &F) -> Result<Option<DiscordConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(client_id), Some(client_secret), Some(redirect_url)) = (
        var("DISCORD_CLIENT_ID"),
        var("DISCORD_CLIENT_SECRET"),
        var("DISCORD_REDIRECT_URI"),
    ) else {
        tracing::warn!(
            "Discord login disabled: DISCORD_CLIENT_ID, DISCORD_CLIENT_SECRET and DISCORD_REDIRECT_URI must all be set"
        );
        return Ok(None);
    };

    let config = DiscordConfig {
        client_id,
        client_secret,
        redirect_url: validate_url("DISCORD_REDIRECT_URI", redirect_url)?,
        auth_url: validate_url(
            "DISCORD_AUTH_URL",
            var("DISCORD_AUTH_URL").unwrap_or_else(|| DISCORD_AUTH_URL.to_string()),
        )?,
        token_url: validate_url(
            "DISCORD_TOKEN_URL",
            var("DISCORD_TOKEN_URL").unwrap_or_else(|| DISCORD_TOKEN_URL.to_string()),
        )?,
        api_url: validate_url(
            "DISCORD_API_URL",
            var("DISCORD_API_URL").unwrap_or_else(|| DISCORD_API_URL.to_string()),
        )?,
    };

    Ok(Some(config))
}

fn panel_from_lookup<F>(var: &F) -> Result<Option<PanelConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(url), Some(api_key)) = (var("PTERO_PANEL_URL"), var("PTERO_API_KEY")) else {
        tracing::warn!(
            "Server provisioning disabled: PTERO_PANEL_URL and PTERO_API_KEY must both be set"
        );
        return Ok(None);
    };

    let egg_id = match var("PTERO_EGG_ID") {
        Some(value) => value
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "PTERO_EGG_ID".to_string(),
                reason: e.to_string(),
            })?,
        None => DEFAULT_EGG_ID,
    };

    Ok(Some(PanelConfig {
        url: validate_url("PTERO_PANEL_URL", url)?
            .trim_end_matches('/')
            .to_string(),
        api_key,
        egg_id,
        docker_image: var("PTERO_DOCKER_IMAGE")
            .unwrap_or_else(|| DEFAULT_DOCKER_IMAGE.to_string()),
    }))
}

fn cookie_secret_from_lookup<F>(var: &F) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(secret) = var("COOKIE_SECRET") else {
        return Ok(None);
    };

    if secret.len() < COOKIE_SECRET_MIN_LEN {
        return Err(ConfigError::InvalidEnvVar {
            name: "COOKIE_SECRET".to_string(),
            reason: format!(
                "must be at least {} bytes, got {}",
                COOKIE_SECRET_MIN_LEN,
                secret.len()
            ),
        });
    }

    Ok(Some(secret))
}

fn validate_url(name: &str, value: String) -> Result<String, ConfigError> {
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    Ok(value)
}
