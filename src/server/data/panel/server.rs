use serde_json::Value;

use crate::server::{
    data::panel::PanelClient,
    error::panel::PanelError,
    model::{panel::Resource, provision::CreatePanelServerParam},
};

/// Repository for hosting servers.
pub struct ServerRepository<'a> {
    client: PanelClient<'a>,
}

impl<'a> ServerRepository<'a> {
    pub fn new(client: PanelClient<'a>) -> Self {
        Self { client }
    }

    /// Creates a server on the panel.
    ///
    /// The attributes are returned untouched since they are passed through to the caller.
    ///
    /// # Returns
    /// - `Ok(Value)` - Attributes of the created server
    /// - `Err(PanelError::Upstream)` - The panel rejected the server
    pub async fn create(&self, param: &CreatePanelServerParam) -> Result<Value, PanelError> {
        let server: Resource<Value> = self.client.post("servers", param).await?;

        Ok(server.attributes)
    }
}
