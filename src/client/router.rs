use dioxus::prelude::*;

use crate::client::component::Layout;
use crate::client::route::{Dashboard, Home, NotFound};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/?:error")]
    Home { error: String },

    #[route("/dashboard")]
    Dashboard {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
