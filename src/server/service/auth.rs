//! OAuth2 login with Discord.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use serenity::all::User as DiscordUser;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::identity::Identity,
    state::OAuth2Client,
};

pub struct DiscordAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
    api_url: &'a str,
}

impl<'a> DiscordAuthService<'a> {
    /// Creates a new DiscordAuthService.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client, used for the token exchange and profile fetch
    /// - `oauth_client` - OAuth2 client configured for the Discord application
    /// - `api_url` - Discord REST API base URL
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        api_url: &'a str,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            api_url,
        }
    }

    /// Builds the Discord authorization URL with a fresh CSRF state token.
    ///
    /// Requests the `identify` and `email` scopes.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - URL to redirect the browser to and the state it carries
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url();

        (authorize_url, csrf_state)
    }

    /// Completes the login by exchanging the authorization code for the user's identity.
    ///
    /// # Arguments
    /// - `authorization_code` - Code Discord appended to the callback URL
    ///
    /// # Returns
    /// - `Ok(Identity)` - Identity of the Discord user who authorized the login
    /// - `Err(AppError::AuthErr(TokenExchange))` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Profile request failed or returned an error status
    pub async fn callback(&self, authorization_code: String) -> Result<Identity, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let user = self.fetch_discord_user(&token).await?;

        Ok(Identity::from_discord_user(&user))
    }

    /// Retrieves a Discord user's information using provided access token
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let access_token = token.access_token().secret();

        let user_info = self
            .http_client
            .get(format!("{}/users/@me", self.api_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user_info)
    }
}
