mod client;
mod model;

#[cfg(feature = "server")]
mod server;

use client::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{config::Config, startup};

        dotenvy::dotenv().ok();
        let config = Config::from_env()?;

        let http_client = startup::setup_reqwest_client()?;
        let state = startup::setup_state(config, http_client)?;

        tracing::info!("Starting server");

        let mut router = dioxus::server::router(App);
        let server_routes = server::router::build(state);
        router = router.merge(server_routes);

        Ok(router)
    })
}
