use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use oauth2::{basic::BasicErrorResponse, HttpClientError, RequestTokenError};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No verified identity cookie was presented.
    ///
    /// Covers an absent cookie as well as one whose signature does not verify.
    /// Results in a 401 Unauthorized response.
    #[error("User not found in session")]
    UserNotInSession,

    /// The identity cookie verified but its JSON does not describe an identity.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Identity cookie does not contain valid user data")]
    InvalidSessionData,

    /// The OAuth callback arrived without an authorization code.
    ///
    /// Discord omits the code when the user denies consent.
    #[error("OAuth callback is missing the authorization code")]
    MissingCode,

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The `state` parameter in the callback URL does not match the token stored in the
    /// `oauth_state` cookie when the login started.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Discord rejected the authorization code or the token endpoint was unreachable.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(
        #[from] RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
    ),
}

impl AuthError {
    /// Value of the `error` query parameter used when the browser login flow fails.
    ///
    /// # Returns
    /// - `"no_code"` - The callback carried no authorization code
    /// - `"auth_failed"` - Any other login failure
    pub fn login_error_code(&self) -> &'static str {
        match self {
            Self::MissingCode => "no_code",
            _ => "auth_failed",
        }
    }
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `UserNotInSession` → 401 Unauthorized with "Unauthorized"
/// - `InvalidSessionData` → 400 Bad Request with "Invalid user data"
/// - Login flow errors → 400 Bad Request with a generic login message
///
/// Login flow errors normally become redirects in the callback controller; this mapping
/// only applies if one escapes into a JSON endpoint.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidSessionData => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "Invalid user data".to_string(),
                }),
            )
                .into_response(),
            err => {
                tracing::debug!("{}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "There was an issue logging you in, please try again.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
