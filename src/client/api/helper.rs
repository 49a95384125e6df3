use reqwasm::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::{
    client::model::error::ApiError,
    model::api::{ErrorDto, ValidationErrorDto},
};

/// Helper function to parse API responses with consistent error handling
///
/// Error bodies are read as `{error}` or, for validation failures, the panel-style
/// `{errors: [{detail}]}`; anything else is reported as raw text.
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status() as u64;

    if (200..300).contains(&status) {
        return response.json::<T>().await.map_err(|e| ApiError {
            status: 500,
            message: format!("Failed to parse response: {}", e),
        });
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = if let Ok(error_dto) = serde_json::from_str::<ErrorDto>(&text) {
        error_dto.error
    } else if let Some(item) = serde_json::from_str::<ValidationErrorDto>(&text)
        .ok()
        .and_then(|dto| dto.errors.into_iter().next())
    {
        item.detail
    } else {
        text
    };

    Err(ApiError { status, message })
}

/// Create a GET request with credentials
pub fn get(url: &str) -> Request {
    Request::get(url).credentials(reqwasm::http::RequestCredentials::Include)
}

/// Create a POST request with credentials and JSON content type
pub fn post(url: &str) -> Request {
    Request::post(url)
        .credentials(reqwasm::http::RequestCredentials::Include)
        .header("Content-Type", "application/json")
}

/// Send a request and handle common errors
pub async fn send_request(request: Request) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to send request: {}", e),
    })
}

/// Serialize a payload to JSON string
pub fn serialize_json<T: serde::Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to serialize request: {}", e),
    })
}
