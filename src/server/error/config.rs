use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable is set but its value cannot be used.
    ///
    /// See the configuration docs on `Config` for the expected format.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Login was requested but the Discord OAuth2 application is not configured.
    #[error("Missing Discord configuration")]
    DiscordNotConfigured,

    /// Provisioning was requested but the panel API is not configured.
    #[error("Missing panel configuration")]
    PanelNotConfigured,
}

/// Converts configuration errors into 500 Internal Server Error responses.
///
/// The message names the missing feature area without revealing which variable is absent;
/// full details are logged.
impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let message = match self {
            Self::DiscordNotConfigured => "Missing Discord configuration",
            Self::PanelNotConfigured | Self::InvalidEnvVar { .. } => "Server configuration error",
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
