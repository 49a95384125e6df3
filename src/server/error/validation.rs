use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ValidationErrorDto, ValidationErrorItemDto};

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A required egg variable was not provided.
    ///
    /// # Fields
    /// - Human readable name of the variable, e.g. `Auto Update`
    #[error("The {0} variable field is required.")]
    MissingField(&'static str),
}

/// Converts validation errors into 422 responses shaped like the panel's own errors.
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorDto {
                errors: vec![ValidationErrorItemDto {
                    code: "ValidationException".to_string(),
                    status: "422".to_string(),
                    detail: self.to_string(),
                }],
            }),
        )
            .into_response()
    }
}
