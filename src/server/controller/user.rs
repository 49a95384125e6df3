use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_cookies::Cookies;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

pub static USER_TAG: &str = "user";

/// GET /api/user - Get the logged in user's Discord identity
///
/// # Authentication
/// Requires the identity cookie set by the login callback
///
/// # Returns
/// - `200 OK`: The identity as UserDto
/// - `400 Bad Request`: Cookie verified but does not contain a valid identity
/// - `401 Unauthorized`: No cookie, or a cookie with an invalid signature
#[utoipa::path(
    get,
    path = "/api/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Logged in user's identity", body = UserDto),
        (status = 400, description = "Identity cookie is malformed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
    security(("discord_user" = [])),
)]
pub async fn get_user(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let identity = AuthGuard::new(&cookies, &state.cookie_key).identity()?;

    Ok((StatusCode::OK, Json(identity.into_dto())))
}
