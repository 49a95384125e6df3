use crate::{
    client::{
        api::helper::{get, parse_response, send_request},
        model::error::ApiError,
    },
    model::user::UserDto,
};

/// Fetches the logged in user.
///
/// Returns `Ok(None)` when the backend answers 401, i.e. nobody is logged in.
pub async fn get_user() -> Result<Option<UserDto>, ApiError> {
    let request = get("/api/user");
    let response = send_request(request).await?;

    match parse_response::<UserDto>(response).await {
        Ok(user) => Ok(Some(user)),
        Err(err) if err.is_unauthorized() => Ok(None),
        Err(err) => Err(err),
    }
}
