use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// Discord identity of the logged in user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct UserDto {
    /// Discord snowflake, kept as a string like Discord sends it.
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}
