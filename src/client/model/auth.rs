use dioxus::prelude::*;

use crate::{client::model::error::ApiError, model::user::UserDto};

/// Shared authentication state, provided once by `App`.
#[derive(Clone, Copy)]
pub struct AuthContext {
    inner: Signal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            inner: Signal::new(AuthState::Initializing),
        }
    }

    pub fn read(&self) -> impl std::ops::Deref<Target = AuthState> + '_ {
        self.inner.read()
    }

    pub fn set(&mut self, state: AuthState) {
        self.inner.set(state);
    }
}

#[derive(Clone, PartialEq)]
pub enum AuthState {
    /// Initial state - haven't checked authentication yet
    Initializing,
    /// User is authenticated
    Authenticated(UserDto),
    /// No identity cookie, or it was rejected
    NotLoggedIn,
    /// Failed to check authentication
    Error(ApiError),
}

impl From<Option<UserDto>> for AuthState {
    fn from(opt: Option<UserDto>) -> Self {
        match opt {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::NotLoggedIn,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Whether the user check finished without an identity, including when it failed.
    pub fn requires_login(&self) -> bool {
        matches!(self, AuthState::NotLoggedIn | AuthState::Error(_))
    }

    /// Get the authenticated user, if any
    pub fn user(&self) -> Option<&UserDto> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests which states send the visitor back to the landing page.
    ///
    /// Expected: a missing identity and any failed user check (400, 500) require login,
    /// an authenticated user or a check still in progress do not
    #[test]
    fn requires_login_after_failed_check() {
        let user = UserDto {
            id: "42".to_string(),
            username: "nelly".to_string(),
            email: None,
            avatar: None,
        };
        let error = |status: u64| {
            AuthState::Error(ApiError {
                status,
                message: "Invalid user data".to_string(),
            })
        };

        assert!(AuthState::NotLoggedIn.requires_login());
        assert!(error(400).requires_login());
        assert!(error(500).requires_login());
        assert!(!AuthState::Initializing.requires_login());
        assert!(!AuthState::Authenticated(user).requires_login());
    }
}
