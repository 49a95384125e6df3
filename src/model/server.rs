use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Request to provision a Python bot server.
///
/// The server also accepts the flags as `"0"`/`"1"`/`"true"`/`"false"` strings; this is
/// the canonical shape the web client sends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct CreateServerDto {
    pub user_uploaded_files: bool,
    pub auto_update: bool,
    #[serde(rename = "mainFile")]
    pub main_file: String,
    #[serde(rename = "extraPackages")]
    pub extra_packages: String,
}

impl Default for CreateServerDto {
    fn default() -> Self {
        Self {
            user_uploaded_files: false,
            auto_update: false,
            main_file: "main.py".to_string(),
            extra_packages: "discord.py".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct CreateServerResponseDto {
    pub success: bool,
    /// Server attributes as returned by the panel.
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub server: Value,
}
