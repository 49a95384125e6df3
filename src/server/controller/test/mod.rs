//! HTTP-level tests for the controllers.
//!
//! Each test serves the real backend router on a local port, pointed at fake Discord and
//! panel upstreams, and drives it with a reqwest client that does not follow redirects.

use cookie::{Cookie, CookieJar, Key};
use reqwest::{
    header::{COOKIE, LOCATION, SET_COOKIE},
    redirect::Policy,
    Response, StatusCode,
};
use serde_json::{json, Value};
use test_utils::{discord::MockDiscord, fixture, panel::MockPanel, server::spawn};

use crate::server::{
    config::{Config, DiscordConfig, PanelConfig},
    middleware::session::{IDENTITY_COOKIE, OAUTH_STATE_COOKIE},
    model::identity::Identity,
    router, startup,
};

mod user;

const REDIRECT_URI: &str = "http://localhost:8080/api/auth/discord/callback";

fn cookie_secret() -> String {
    "s".repeat(64)
}

/// Backend under test.
struct TestApp {
    url: String,
    client: reqwest::Client,
    key: Key,
}

impl TestApp {
    /// Serves the backend with the given upstreams; `None` leaves that feature unconfigured.
    async fn spawn(discord: Option<&MockDiscord>, panel: Option<&MockPanel>) -> Self {
        let config = Config {
            discord: discord.map(|discord| DiscordConfig {
                client_id: "1234567890".to_string(),
                client_secret: "discord-secret".to_string(),
                redirect_url: REDIRECT_URI.to_string(),
                auth_url: discord.auth_url(),
                token_url: discord.token_url(),
                api_url: discord.api_url(),
            }),
            panel: panel.map(|panel| PanelConfig {
                url: panel.url.clone(),
                api_key: panel.api_key.clone(),
                egg_id: 16,
                docker_image: "ghcr.io/parkervcp/yolks:python_3.12".to_string(),
            }),
            cookie_secret: Some(cookie_secret()),
        };

        let http_client = startup::setup_reqwest_client().unwrap();
        let state = startup::setup_state(config, http_client).unwrap();
        let url = spawn(router::build(state)).await.unwrap();

        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            url,
            client,
            key: Key::from(cookie_secret().as_bytes()),
        }
    }

    async fn get(&self, path: &str, cookie: Option<String>) -> Response {
        let mut request = self.client.get(format!("{}{}", self.url, path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.unwrap()
    }

    async fn post(&self, path: &str, cookie: Option<String>, body: &str) -> Response {
        let mut request = self
            .client
            .post(format!("{}{}", self.url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.unwrap()
    }

    /// `Cookie` header value carrying a cookie signed with the app's key.
    fn signed_cookie(&self, name: &str, value: &str) -> String {
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key)
            .add(Cookie::new(name.to_string(), value.to_string()));
        let signed = jar.get(name).unwrap().value().to_string();

        Cookie::new(name.to_string(), signed).encoded().to_string()
    }

    fn identity_cookie(&self, identity: &Identity) -> String {
        self.signed_cookie(IDENTITY_COOKIE, &serde_json::to_string(identity).unwrap())
    }

    /// Verifies a cookie's signature and returns its payload.
    fn verify(&self, cookie: &Cookie<'static>) -> Option<String> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.add_original(cookie.clone());

        jar.signed(&self.key)
            .get(&name)
            .map(|cookie| cookie.value().to_string())
    }
}

fn identity() -> Identity {
    Identity {
        id: fixture::DISCORD_ID.to_string(),
        username: fixture::DISCORD_USERNAME.to_string(),
        email: Some(fixture::DISCORD_EMAIL.to_string()),
        avatar: Some(fixture::DISCORD_AVATAR.to_string()),
    }
}

/// Finds a cookie set by the response.
fn set_cookie(response: &Response, name: &str) -> Option<Cookie<'static>> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .find(|cookie| cookie.name() == name)
}

/// `name=value` pair of a cookie set by the response, exactly as a browser sends it back.
fn issued_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .find(|pair| pair.split_once('=').is_some_and(|(key, _)| key == name))
        .map(str::to_string)
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn is_removal(cookie: &Cookie<'static>) -> bool {
    cookie.value().is_empty() && cookie.max_age() == Some(time::Duration::ZERO)
}
