use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_brands_icons::FaDiscord, Icon};

use crate::client::{
    constant::{LOGIN_URL, LOGOUT_URL, SITE_NAME},
    model::auth::{AuthContext, AuthState},
    router::Route,
};

#[component]
pub fn Header() -> Element {
    let auth_context = use_context::<AuthContext>();
    let state = auth_context.read();

    let user_logged_in = state.is_authenticated();
    let fetch_completed = !matches!(&*state, AuthState::Initializing);

    rsx!(div {
        class: "fixed flex justify-between gap-4 w-full h-20 py-2 px-4 bg-base-200 z-20",
        div {
            class: "flex items-center",
            Link {
                to: Route::Home { error: String::new() },
                p {
                    class: "md:text-xl text-wrap",
                    {SITE_NAME}
                }
            }
        }
        div {
            class: "flex items-center gap-2",
            if fetch_completed && user_logged_in {
                Link {
                    to: Route::Dashboard {},
                    class: "btn btn-outline",
                    p {
                        "Dashboard"
                    }
                }
                a {
                    href: LOGOUT_URL,
                    div {
                        class: "btn btn-outline",
                        p {
                            "Logout"
                        }
                    }
                }
            } else if fetch_completed {
                a {
                    href: LOGIN_URL,
                    div {
                        class: "btn btn-outline flex gap-2 items-center",
                        Icon {
                            width: 22,
                            height: 22,
                            icon: FaDiscord
                        }
                        p {
                            "Login"
                        }
                    }
                }
            }
        }
    })
}
