use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use dioxus_logger::tracing;
use serde::Deserialize;
use tower_cookies::Cookies;
use utoipa::IntoParams;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::AuthError, config::ConfigError, AppError},
        middleware::session::{IdentityCookie, OAuthStateCookie},
        model::identity::Identity,
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Page the browser lands on after a successful login.
const DASHBOARD_PATH: &str = "/dashboard";

/// Query parameters for the OAuth callback endpoint.
///
/// Both are optional: Discord omits `code` when the user denies consent, and a request
/// that did not come from Discord may carry neither.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code from Discord for token exchange.
    pub code: Option<String>,
    /// CSRF state token to be validated against the `oauth_state` cookie.
    pub state: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/auth/discord",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the Discord authorization page"),
        (status = 500, description = "Discord login is not configured", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = state
        .oauth_client
        .as_ref()
        .ok_or(ConfigError::DiscordNotConfigured)?;

    let auth_service =
        DiscordAuthService::new(&state.http_client, oauth_client, &state.discord_api_url);

    let (url, csrf_token) = auth_service.login_url();

    OAuthStateCookie::new(&cookies, &state.cookie_key).set(csrf_token.secret());

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes the Discord login.
///
/// Always answers with a redirect: to the dashboard once the identity cookie is set, or
/// back to the landing page with an `error` query parameter (`no_code` or `auth_failed`).
#[utoipa::path(
    get,
    path = "/api/auth/discord/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Redirect to /dashboard on success, or to /?error=no_code|auth_failed")
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    match complete_login(&state, &cookies, params).await {
        Ok(identity) => {
            tracing::info!("Discord user {} logged in", identity.id);
            Redirect::temporary(DASHBOARD_PATH)
        }
        Err(err) => {
            let code = match &err {
                AppError::AuthErr(auth_err) => auth_err.login_error_code(),
                _ => "auth_failed",
            };

            match &err {
                AppError::AuthErr(AuthError::MissingCode) => {
                    tracing::debug!("OAuth callback without authorization code")
                }
                _ => tracing::error!("Discord login failed: {}", err),
            }

            Redirect::temporary(&format!("/?error={}", code))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Identity cookie removed, redirect to /")
    ),
)]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> impl IntoResponse {
    IdentityCookie::new(&cookies, &state.cookie_key).clear();

    Redirect::temporary("/")
}

async fn complete_login(
    state: &AppState,
    cookies: &Cookies,
    params: CallbackParams,
) -> Result<Identity, AppError> {
    let stored_state = OAuthStateCookie::new(cookies, &state.cookie_key).take();

    let code = params.code.ok_or(AuthError::MissingCode)?;

    validate_csrf(stored_state, params.state)?;

    let oauth_client = state
        .oauth_client
        .as_ref()
        .ok_or(ConfigError::DiscordNotConfigured)?;

    let identity =
        DiscordAuthService::new(&state.http_client, oauth_client, &state.discord_api_url)
            .callback(code)
            .await?;

    IdentityCookie::new(cookies, &state.cookie_key).set(&identity)?;

    Ok(identity)
}

fn validate_csrf(stored_state: Option<String>, csrf_state: Option<String>) -> Result<(), AppError> {
    match (stored_state, csrf_state) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
