//! Canned upstream payloads.

use serde_json::{json, Value};

/// Discord id used by the default profile fixture.
pub const DISCORD_ID: &str = "80351110224678912";
/// Username used by the default profile fixture.
pub const DISCORD_USERNAME: &str = "Nelly_99";
/// Email used by the default profile fixture.
pub const DISCORD_EMAIL: &str = "nelly@discord.com";
/// Avatar hash used by the default profile fixture.
pub const DISCORD_AVATAR: &str = "8342729096ea3675442027381ff50dfe";

/// Builds a `users/@me` payload shaped like Discord's response.
///
/// Includes the fields Discord sends for an `identify email` token so the payload
/// deserializes into the full Discord user model.
pub fn discord_user(id: &str, username: &str, email: Option<&str>, avatar: Option<&str>) -> Value {
    json!({
        "id": id,
        "username": username,
        "discriminator": "0",
        "global_name": username,
        "avatar": avatar,
        "bot": false,
        "system": false,
        "mfa_enabled": false,
        "banner": null,
        "accent_color": null,
        "locale": "en-US",
        "verified": true,
        "email": email,
        "flags": 0,
        "premium_type": 0,
        "public_flags": 0
    })
}

/// Default Discord profile used across tests.
pub fn default_discord_user() -> Value {
    discord_user(
        DISCORD_ID,
        DISCORD_USERNAME,
        Some(DISCORD_EMAIL),
        Some(DISCORD_AVATAR),
    )
}
