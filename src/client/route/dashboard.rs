use dioxus::prelude::*;

use crate::{
    client::{
        component::{LoadingPage, Page},
        constant::{LOGOUT_URL, SITE_NAME},
        model::{
            auth::{AuthContext, AuthState},
            provision::ProvisionState,
        },
        router::Route,
    },
    model::server::CreateServerResponseDto,
};

#[cfg(feature = "web")]
use crate::{client::api::server::create_server, model::server::CreateServerDto};

#[component]
pub fn Dashboard() -> Element {
    let auth_context = use_context::<AuthContext>();
    let nav = navigator();

    // Send visitors without a usable identity back to the landing page
    use_effect(move || {
        if auth_context.read().requires_login() {
            nav.replace(Route::Home {
                error: String::new(),
            });
        }
    });

    let state = auth_context.read();

    rsx! {
        document::Title { "Dashboard | {SITE_NAME}" }
        match &*state {
            AuthState::Initializing | AuthState::NotLoggedIn | AuthState::Error(_) => rsx! {
                LoadingPage {}
            },
            AuthState::Authenticated(user) => rsx! {
                Page {
                    class: "flex flex-col gap-6 items-center",
                    div {
                        class: "card bg-base-200 w-full max-w-xl",
                        div {
                            class: "card-body",
                            h2 { class: "card-title", "Account" }
                            p { "Username: {user.username}" }
                            p { "Email: " {user.email.as_deref().unwrap_or("not shared")} }
                            p { "Discord ID: {user.id}" }
                        }
                    }
                    CreateServerCard {}
                    a {
                        href: LOGOUT_URL,
                        class: "btn btn-outline",
                        "Logout"
                    }
                }
            },
        }
    }
}

#[component]
fn CreateServerCard() -> Element {
    #[allow(unused_mut)]
    let mut provision = use_signal(ProvisionState::default);

    let on_create = move |_| {
        #[cfg(feature = "web")]
        spawn(async move {
            provision.set(ProvisionState::Creating);

            let state = match create_server(&CreateServerDto::default()).await {
                Ok(response) => ProvisionState::Created(response),
                Err(err) => ProvisionState::Failed(err),
            };
            provision.set(state);
        });
    };

    let creating = provision.read().is_creating();

    rsx! {
        div {
            class: "card bg-base-200 w-full max-w-xl",
            div {
                class: "card-body gap-4",
                h2 { class: "card-title", "Bot Server" }
                p { "Creates a Python server that runs main.py with discord.py installed." }
                button {
                    class: "btn btn-primary",
                    disabled: creating,
                    onclick: on_create,
                    if creating {
                        span { class: "loading loading-spinner" }
                        "Creating..."
                    } else {
                        "Create Bot Server"
                    }
                }
                match &*provision.read() {
                    ProvisionState::Created(response) => rsx! {
                        CreatedServer { response: response.clone() }
                    },
                    ProvisionState::Failed(err) => rsx! {
                        div {
                            role: "alert",
                            class: "alert alert-error",
                            "Failed to create server: {err.message}"
                        }
                    },
                    _ => rsx! {},
                }
            }
        }
    }
}

#[component]
fn CreatedServer(response: CreateServerResponseDto) -> Element {
    let name = response.server["name"].as_str().unwrap_or("your bot").to_string();

    rsx! {
        div {
            role: "alert",
            class: "alert alert-success flex flex-col items-start",
            p { "Server {name} created." }
            p { "200MB RAM, 500MB Storage" }
        }
    }
}
