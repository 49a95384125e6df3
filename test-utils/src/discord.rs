//! Fake Discord OAuth2 and user API.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};

use crate::{error::TestError, fixture, server::spawn};

/// Authorization code accepted by default.
pub const VALID_CODE: &str = "valid-code";
/// Access token handed out for a valid code.
pub const ACCESS_TOKEN: &str = "mock-access-token";

struct DiscordState {
    code: String,
    user: Value,
    token_requests: AtomicUsize,
}

/// Running fake of Discord's OAuth2 token endpoint and `users/@me`.
pub struct MockDiscord {
    /// Base URL of the fake, e.g. `http://127.0.0.1:41234`.
    pub url: String,
    state: Arc<DiscordState>,
}

/// Builder for [`MockDiscord`].
pub struct MockDiscordBuilder {
    code: String,
    user: Value,
}

impl MockDiscord {
    /// Starts a builder with [`VALID_CODE`] and the default profile fixture.
    pub fn builder() -> MockDiscordBuilder {
        MockDiscordBuilder {
            code: VALID_CODE.to_string(),
            user: fixture::default_discord_user(),
        }
    }

    /// Authorization URL the backend should redirect browsers to.
    pub fn auth_url(&self) -> String {
        format!("{}/api/oauth2/authorize", self.url)
    }

    /// Token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}/api/oauth2/token", self.url)
    }

    /// REST API base URL (`users/@me` lives below it).
    pub fn api_url(&self) -> String {
        format!("{}/api", self.url)
    }

    /// Number of token exchange attempts received so far.
    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }
}

impl MockDiscordBuilder {
    /// Sets the only authorization code the token endpoint accepts.
    pub fn code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }

    /// Sets the profile returned from `users/@me`.
    pub fn user(mut self, user: Value) -> Self {
        self.user = user;
        self
    }

    /// Spawns the fake on a local port.
    pub async fn build(self) -> Result<MockDiscord, TestError> {
        let state = Arc::new(DiscordState {
            code: self.code,
            user: self.user,
            token_requests: AtomicUsize::new(0),
        });

        let router = Router::new()
            .route("/api/oauth2/token", post(token))
            .route("/api/users/@me", get(current_user))
            .with_state(state.clone());

        let url = spawn(router).await?;

        Ok(MockDiscord { url, state })
    }
}

async fn token(
    State(state): State<Arc<DiscordState>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    state.token_requests.fetch_add(1, Ordering::SeqCst);

    let grant_ok = form.get("grant_type").map(String::as_str) == Some("authorization_code");
    let code_ok = form.get("code") == Some(&state.code);

    if !(grant_ok && code_ok) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid \"code\" in request."
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 604800,
            "refresh_token": "mock-refresh-token",
            "scope": "identify email"
        })),
    )
}

async fn current_user(
    State(state): State<Arc<DiscordState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let expected = format!("Bearer {}", ACCESS_TOKEN);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401: Unauthorized", "code": 0 })),
        );
    }

    (StatusCode::OK, Json(state.user.clone()))
}
