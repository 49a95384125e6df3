//! HTTP client for the panel's `/api/application` endpoints.
//!
//! [`PanelClient`] attaches the application API key and JSON headers to every request and
//! turns non-success responses into [`PanelError::Upstream`] carrying the panel's body.
//! The repositories in the submodules build on it.

pub mod node;
pub mod server;
pub mod user;

pub use node::NodeRepository;
pub use server::ServerRepository;
pub use user::PanelUserRepository;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::server::{
    config::PanelConfig,
    error::panel::PanelError,
    model::panel::ListResponse,
};

/// Authenticated client for the panel's application API.
///
/// Borrows the shared HTTP client and panel configuration from application state, so it is
/// cheap to construct per request and to copy into each repository.
#[derive(Clone, Copy)]
pub struct PanelClient<'a> {
    http_client: &'a reqwest::Client,
    config: &'a PanelConfig,
}

impl<'a> PanelClient<'a> {
    /// Creates a new PanelClient.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `config` - Panel URL and application API key
    ///
    /// # Returns
    /// - `PanelClient` - New client instance
    pub fn new(http_client: &'a reqwest::Client, config: &'a PanelConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Sends a GET request and decodes the JSON response.
    ///
    /// # Arguments
    /// - `path` - Endpoint path below `/api/application/`
    /// - `query` - Query string pairs
    ///
    /// # Returns
    /// - `Ok(T)` - Decoded response body
    /// - `Err(PanelError::Upstream)` - The panel answered with a non-success status
    /// - `Err(PanelError::Request)` - Transport failure or undecodable body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PanelError> {
        self.send(path, self.request(Method::GET, path).query(query))
            .await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response.
    ///
    /// # Arguments
    /// - `path` - Endpoint path below `/api/application/`
    /// - `body` - Request payload
    ///
    /// # Returns
    /// - `Ok(T)` - Decoded response body
    /// - `Err(PanelError)` - See [`PanelClient::get`]
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PanelError> {
        self.send(path, self.request(Method::POST, path).json(body))
            .await
    }

    /// Fetches one page of a listing endpoint.
    ///
    /// Pages are 1-based like the panel's own pagination.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        filter: &[(&str, String)],
    ) -> Result<ListResponse<T>, PanelError> {
        let mut query = filter.to_vec();
        query.push(("page", page.to_string()));

        self.get(path, &query).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/application/{}", self.config.url, path);

        self.http_client
            .request(method, url)
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, PanelError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let details =
                serde_json::from_str::<Value>(&text).unwrap_or_else(|_| Value::String(text));

            return Err(PanelError::Upstream {
                endpoint: path.to_string(),
                status: status.as_u16(),
                details,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
