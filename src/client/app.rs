use dioxus::prelude::*;

use crate::client::{constant::SITE_NAME, model::auth::AuthContext, router::Route};

#[cfg(feature = "web")]
use crate::client::{api::user::get_user, model::auth::AuthState};

#[component]
pub fn App() -> Element {
    #[allow(unused_mut, unused_variables)]
    let mut auth_context = use_context_provider(AuthContext::new);

    // Fetch user on first load
    #[cfg(feature = "web")]
    use_future(move || async move {
        let state = match get_user().await {
            Ok(user) => AuthState::from(user),
            Err(err) => AuthState::Error(err),
        };
        auth_context.set(state);
    });

    rsx! {
        document::Title { "{SITE_NAME}" }
        document::Meta {
            name: "description",
            content: "Host your Discord bot with one click"
        }
        Router::<Route> {}
    }
}
