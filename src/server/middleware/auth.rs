use dioxus_logger::tracing;
use tower_cookies::{Cookies, Key};

use crate::server::{
    error::auth::AuthError, middleware::session::IdentityCookie, model::identity::Identity,
};

/// Gate for endpoints that act on behalf of the logged in user.
pub struct AuthGuard<'a> {
    cookies: &'a Cookies,
    key: &'a Key,
}

impl<'a> AuthGuard<'a> {
    pub fn new(cookies: &'a Cookies, key: &'a Key) -> Self {
        Self { cookies, key }
    }

    /// Returns the identity from the identity cookie.
    ///
    /// # Returns
    /// - `Ok(Identity)` - Verified identity
    /// - `Err(AuthError::UserNotInSession)` - No cookie or an invalid signature
    /// - `Err(AuthError::InvalidSessionData)` - Verified cookie with malformed JSON
    pub fn identity(&self) -> Result<Identity, AuthError> {
        IdentityCookie::new(self.cookies, self.key)
            .get()?
            .ok_or(AuthError::UserNotInSession)
    }

    /// Requires a usable identity before acting on the user's behalf.
    ///
    /// Unlike [`AuthGuard::identity`], a malformed identity is reported as unauthenticated.
    ///
    /// # Returns
    /// - `Ok(Identity)` - Verified identity
    /// - `Err(AuthError::UserNotInSession)` - No usable identity
    pub fn require(&self) -> Result<Identity, AuthError> {
        match self.identity() {
            Err(AuthError::InvalidSessionData) => {
                tracing::debug!("Rejecting request with malformed identity cookie");
                Err(AuthError::UserNotInSession)
            }
            result => result,
        }
    }
}
