use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "server")]
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ErrorDto {
    pub error: String,
}

/// Error body carrying the payload an upstream service answered with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct UpstreamErrorDto {
    pub error: String,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub details: Value,
}

/// Validation failure body, shaped like the panel's own validation errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ValidationErrorDto {
    pub errors: Vec<ValidationErrorItemDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ValidationErrorItemDto {
    pub code: String,
    pub status: String,
    pub detail: String,
}
