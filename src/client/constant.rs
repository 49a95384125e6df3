pub const SITE_NAME: &str = "Bot Host";

/// Backend endpoint that starts the Discord login.
pub const LOGIN_URL: &str = "/api/auth/discord";
pub const LOGOUT_URL: &str = "/api/auth/logout";
