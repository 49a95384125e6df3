use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use serde_json::Value;
use thiserror::Error;

use crate::model::api::{ErrorDto, UpstreamErrorDto};

#[derive(Error, Debug)]
pub enum PanelError {
    /// The panel answered with a non-success status.
    ///
    /// Results in 500 Internal Server Error carrying the panel's response body.
    #[error("Panel request to {endpoint} failed with status {status}: {details}")]
    Upstream {
        /// Endpoint path below `/api/application`
        endpoint: String,
        /// HTTP status returned by the panel
        status: u16,
        /// Response body, parsed as JSON when possible, else the raw text
        details: Value,
    },

    /// The request never completed or the response could not be decoded.
    ///
    /// Results in 500 Internal Server Error carrying the transport error message.
    #[error("Panel request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Every allocation on every node is assigned, or the panel has no nodes.
    ///
    /// Results in 503 Service Unavailable.
    #[error("No available server allocation found")]
    NoAllocationAvailable,
}

/// Converts panel errors into HTTP responses.
///
/// # Returns
/// - 503 Service Unavailable - For `NoAllocationAvailable`
/// - 500 Internal Server Error - For upstream and transport failures, with the upstream
///   payload (or error message) attached as `details`
impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        match self {
            Self::NoAllocationAvailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::Upstream { details, .. } => {
                tracing::error!("Panel API error: {}", details);
                upstream_failure(details)
            }
            Self::Request(err) => {
                tracing::error!("Panel API error: {}", err);
                upstream_failure(Value::String(err.to_string()))
            }
        }
    }
}

fn upstream_failure(details: Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(UpstreamErrorDto {
            error: "Failed to create server".to_string(),
            details,
        }),
    )
        .into_response()
}
