//! Type-safe wrappers around the signed cookies this service issues.
//!
//! This module provides type-safe interfaces for the two cookies the login flow relies on,
//! organized by concern. Each struct handles a specific cookie, keeping its name, attributes
//! and encoding in one place.
//!
//! # Architecture
//!
//! - `IdentityCookie` - The logged in user's Discord identity as JSON
//! - `OAuthStateCookie` - CSRF state token for an OAuth flow in progress
//!
//! Both cookies are HTTP-only and signed with the application key, so the browser can
//! neither read nor forge them. The payload is stored in clear after the signature, and the
//! signed value is percent-encoded in `Set-Cookie`. The cookie manager percent-decodes
//! request cookies before the signature is checked.

use cookie::{CookieJar, SameSite};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use time::Duration;
use tower_cookies::{Cookie, Cookies, Key};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::identity::Identity,
};

/// Name of the cookie carrying the identity JSON.
pub const IDENTITY_COOKIE: &str = "discord_user";
/// Name of the cookie carrying the OAuth CSRF state.
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

const IDENTITY_MAX_AGE_DAYS: i64 = 1;
const OAUTH_STATE_MAX_AGE_MINUTES: i64 = 10;

/// Identity cookie management.
///
/// Stores the identity established by a successful Discord login and reads it back on
/// later requests.
pub struct IdentityCookie<'a> {
    cookies: &'a Cookies,
    key: &'a Key,
}

impl<'a> IdentityCookie<'a> {
    /// Creates a new IdentityCookie wrapper.
    ///
    /// # Arguments
    /// - `cookies` - Request cookie jar
    /// - `key` - Key used to sign and verify the cookie
    pub fn new(cookies: &'a Cookies, key: &'a Key) -> Self {
        Self { cookies, key }
    }

    /// Stores the identity, replacing any previous one.
    ///
    /// The cookie expires after one day.
    ///
    /// # Returns
    /// - `Ok(())` - Cookie queued on the response
    /// - `Err(AppError::InternalError)` - Identity could not be serialized
    pub fn set(&self, identity: &Identity) -> Result<(), AppError> {
        let value = serde_json::to_string(identity)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize identity: {}", e)))?;

        let cookie = Cookie::build((IDENTITY_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(IDENTITY_MAX_AGE_DAYS))
            .build();

        add_signed(self.cookies, self.key, cookie);
        Ok(())
    }

    /// Reads the identity from the request.
    ///
    /// Cookies with a missing or invalid signature are ignored.
    ///
    /// # Returns
    /// - `Ok(Some(Identity))` - A verified identity
    /// - `Ok(None)` - No verified identity cookie
    /// - `Err(AuthError::InvalidSessionData)` - Verified cookie whose JSON is not an identity
    pub fn get(&self) -> Result<Option<Identity>, AuthError> {
        let Some(cookie) = self.cookies.signed(self.key).get(IDENTITY_COOKIE) else {
            return Ok(None);
        };

        serde_json::from_str(cookie.value())
            .map(Some)
            .map_err(|_| AuthError::InvalidSessionData)
    }

    /// Removes the identity cookie from the browser.
    pub fn clear(&self) {
        self.cookies.remove(removal(IDENTITY_COOKIE));
    }
}

/// CSRF state management for the OAuth flow.
pub struct OAuthStateCookie<'a> {
    cookies: &'a Cookies,
    key: &'a Key,
}

impl<'a> OAuthStateCookie<'a> {
    pub fn new(cookies: &'a Cookies, key: &'a Key) -> Self {
        Self { cookies, key }
    }

    /// Stores the state token sent to Discord with the authorization request.
    pub fn set(&self, state: &str) {
        let cookie = Cookie::build((OAUTH_STATE_COOKIE, state.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::minutes(OAUTH_STATE_MAX_AGE_MINUTES))
            .build();

        add_signed(self.cookies, self.key, cookie);
    }

    /// Reads the stored state token and removes the cookie.
    ///
    /// The token is single use; the cookie is removed whether or not it verified.
    ///
    /// # Returns
    /// - `Some(String)` - The verified state token
    /// - `None` - No cookie, or its signature did not verify
    pub fn take(&self) -> Option<String> {
        let state = self
            .cookies
            .signed(self.key)
            .get(OAUTH_STATE_COOKIE)
            .map(|cookie| cookie.value().to_string());

        self.cookies.remove(removal(OAUTH_STATE_COOKIE));
        state
    }
}

/// Signs the cookie and queues it with its signed value percent-encoded.
///
/// Identity JSON may hold `;`, `,`, `"` or spaces, none of which are allowed raw in a
/// cookie value.
fn add_signed(cookies: &Cookies, key: &Key, cookie: Cookie<'static>) {
    let name = cookie.name().to_string();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie);

    if let Some(signed) = jar.get(&name) {
        let mut signed = signed.clone();
        let encoded = utf8_percent_encode(signed.value(), NON_ALPHANUMERIC).to_string();
        signed.set_value(encoded);

        cookies.add(signed);
    }
}

/// Cookie matching the name and path of an issued cookie, for removal.
fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}
