use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use tower_cookies::Cookies;

use crate::{
    model::{
        api::{ErrorDto, UpstreamErrorDto, ValidationErrorDto},
        server::{CreateServerDto, CreateServerResponseDto},
    },
    server::{
        error::{config::ConfigError, AppError},
        middleware::auth::AuthGuard,
        model::provision::CreateServerRequest,
        service::provision::ProvisionService,
        state::AppState,
    },
};

pub static SERVER_TAG: &str = "server";

/// POST /api/create-server - Provision a Python bot server for the logged in user
///
/// The body is read as raw JSON rather than `CreateServerDto` so that flags given as
/// strings or numbers, and keys set to `null`, are accepted.
///
/// # Authentication
/// Requires the identity cookie set by the login callback
#[utoipa::path(
    post,
    path = "/api/create-server",
    tag = SERVER_TAG,
    request_body = CreateServerDto,
    responses(
        (status = 200, description = "Server created", body = CreateServerResponseDto),
        (status = 400, description = "Body is not valid JSON", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 422, description = "A required field is missing", body = ValidationErrorDto),
        (status = 500, description = "Panel not configured or a panel request failed", body = UpstreamErrorDto),
        (status = 503, description = "No free allocation on any node", body = ErrorDto)
    ),
    security(("discord_user" = [])),
)]
pub async fn create_server(
    State(state): State<AppState>,
    cookies: Cookies,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&cookies, &state.cookie_key).require()?;

    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid JSON input".to_string()))?;

    let panel = state
        .panel
        .as_ref()
        .ok_or(ConfigError::PanelNotConfigured)?;

    let param = CreateServerRequest::from_json(&body).into_param()?;

    let server = ProvisionService::new(&state.http_client, panel)
        .provision(&identity, param)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CreateServerResponseDto {
            success: true,
            server,
        }),
    ))
}
