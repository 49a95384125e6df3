//! Route table and OpenAPI document for the backend API.

use axum::{routing::get, Json, Router};
use tower_cookies::CookieManagerLayer;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{auth, server, user},
    state::AppState,
};

/// Path the generated OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api/docs/openapi.json";

/// Registers the identity cookie as the API's security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "discord_user",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "discord_user",
                "Signed identity cookie issued by GET /api/auth/discord/callback.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "bothost API",
        description = "Discord login and Python bot server provisioning on a hosting panel."
    ),
    tags(
        (name = "auth", description = "Discord OAuth2 login and logout"),
        (name = "user", description = "Logged in user"),
        (name = "server", description = "Bot server provisioning")
    )
)]
pub struct ApiDoc;

/// Routes of the backend API with their OpenAPI metadata.
pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(user::get_user))
        .routes(routes!(server::create_server))
}

/// Builds the backend router, ready to be merged into the fullstack router.
///
/// Serves the OpenAPI document and installs the cookie manager every handler relies on.
pub fn build(state: AppState) -> Router {
    let (router, api) = router().split_for_parts();

    router
        .route(
            OPENAPI_PATH,
            get(move || {
                let api = api.clone();
                async move { Json(api) }
            }),
        )
        .with_state(state)
        .layer(CookieManagerLayer::new())
}
