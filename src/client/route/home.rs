use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_brands_icons::FaDiscord, Icon};

use crate::client::{
    component::Page,
    constant::{LOGIN_URL, SITE_NAME},
    model::auth::AuthContext,
    router::Route,
};

/// Readable text for the `error` query parameter set by the login callback.
fn login_error_message(error: &str) -> Option<&'static str> {
    match error {
        "" => None,
        "no_code" => Some("Discord did not return an authorization code. Please try logging in again."),
        "auth_failed" => Some("Logging in with Discord failed. Please try again."),
        _ => Some("Something went wrong while logging you in."),
    }
}

#[component]
pub fn Home(error: String) -> Element {
    let auth_context = use_context::<AuthContext>();
    let logged_in = auth_context.read().is_authenticated();
    let error_message = login_error_message(&error);

    rsx! {
        document::Title { "{SITE_NAME}" }
        Page {
            class: "flex flex-col gap-6 items-center justify-center w-full h-full",
            h1 {
                class: "text-3xl",
                {SITE_NAME}
            }
            p {
                "Host your Python Discord bot without managing a server."
            }
            if let Some(message) = error_message {
                div {
                    role: "alert",
                    class: "alert alert-error",
                    "{message}"
                }
            }
            if logged_in {
                Link {
                    to: Route::Dashboard {},
                    class: "btn btn-primary",
                    "Go to dashboard"
                }
            } else {
                a {
                    href: LOGIN_URL,
                    div {
                        class: "btn btn-primary flex gap-2 items-center",
                        Icon {
                            width: 22,
                            height: 22,
                            icon: FaDiscord
                        }
                        p {
                            "Login with Discord"
                        }
                    }
                }
            }
        }
    }
}
