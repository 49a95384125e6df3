//! Identity of a user logged in through Discord.
//!
//! The identity is the only user record this service keeps, and it lives in the signed
//! `discord_user` cookie rather than a database.

use serde::{Deserialize, Serialize};
use serenity::all::User as DiscordUser;

use crate::model::user::UserDto;

/// Discord identity carried in the identity cookie.
///
/// Serialized as `{id, username, email, avatar}`. `email` is `None` when the `email`
/// scope was not granted and `avatar` is `None` when the user has no custom avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Discord snowflake as a decimal string.
    pub id: String,
    /// Discord username.
    pub username: String,
    pub email: Option<String>,
    /// Avatar hash, not a URL.
    pub avatar: Option<String>,
}

impl Identity {
    /// Builds an identity from the profile returned by Discord's `/users/@me`.
    ///
    /// # Arguments
    /// - `user` - Discord user profile
    ///
    /// # Returns
    /// - `Identity` - The identity to store in the cookie
    pub fn from_discord_user(user: &DiscordUser) -> Self {
        Self {
            id: user.id.get().to_string(),
            username: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.as_ref().map(|hash| hash.to_string()),
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            avatar: self.avatar,
        }
    }

    /// Username to register on the panel.
    ///
    /// The panel only accepts lowercase alphanumerics, so the Discord username is
    /// lowercased and every other character dropped.
    ///
    /// # Returns
    /// - `String` - Sanitized username, possibly empty
    pub fn panel_username(&self) -> String {
        self.username
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect()
    }

    /// Name given to the user's hosting server.
    pub fn server_name(&self) -> String {
        format!("{}-bot", self.username)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn identity(username: &str) -> Identity {
        Identity {
            id: "80351110224678912".to_string(),
            username: username.to_string(),
            email: None,
            avatar: None,
        }
    }

    /// Tests panel username sanitization.
    ///
    /// Expected: lowercased with everything outside [a-z0-9] removed
    #[test]
    fn sanitizes_panel_username() {
        assert_eq!(identity("Nelly_99").panel_username(), "nelly99");
        assert_eq!(identity("A.B-c d").panel_username(), "abcd");
        assert_eq!(identity("ÆØÅ").panel_username(), "");
    }

    #[test]
    fn server_name_keeps_original_username() {
        assert_eq!(identity("Nelly_99").server_name(), "Nelly_99-bot");
    }

    /// Tests the cookie JSON shape.
    ///
    /// Expected: all four keys are present, missing values serialize as null
    #[test]
    fn serializes_all_fields() {
        let value = serde_json::to_value(identity("nelly")).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "80351110224678912",
                "username": "nelly",
                "email": null,
                "avatar": null
            })
        );
    }

    /// Tests building an identity from a Discord profile.
    ///
    /// Expected: snowflake rendered as a string, avatar hash preserved
    #[test]
    fn builds_from_discord_profile() {
        let user: DiscordUser = serde_json::from_value(test_utils::fixture::discord_user(
            "80351110224678912",
            "Nelly",
            Some("nelly@discord.com"),
            Some("8342729096ea3675442027381ff50dfe"),
        ))
        .unwrap();

        let identity = Identity::from_discord_user(&user);

        assert_eq!(identity.id, "80351110224678912");
        assert_eq!(identity.username, "Nelly");
        assert_eq!(identity.email.as_deref(), Some("nelly@discord.com"));
        assert_eq!(
            identity.avatar.as_deref(),
            Some("8342729096ea3675442027381ff50dfe")
        );
    }
}
