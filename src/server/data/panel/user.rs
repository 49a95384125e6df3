use crate::server::{
    data::panel::PanelClient,
    error::panel::PanelError,
    model::panel::{CreatePanelUserParam, ListResponse, PanelUser, Resource},
};

/// Repository for panel user accounts.
pub struct PanelUserRepository<'a> {
    client: PanelClient<'a>,
}

impl<'a> PanelUserRepository<'a> {
    pub fn new(client: PanelClient<'a>) -> Self {
        Self { client }
    }

    /// Finds the panel user linked to an external id.
    ///
    /// # Arguments
    /// - `external_id` - External id the user was registered with (the Discord id)
    ///
    /// # Returns
    /// - `Ok(Some(PanelUser))` - First user matching the filter
    /// - `Ok(None)` - No user carries this external id
    /// - `Err(PanelError)` - Lookup failed
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PanelUser>, PanelError> {
        let users: ListResponse<PanelUser> = self
            .client
            .get("users", &[("filter[external_id]", external_id.to_string())])
            .await?;

        Ok(users.into_attributes().into_iter().next())
    }

    /// Registers a new panel user.
    ///
    /// # Returns
    /// - `Ok(PanelUser)` - The created user
    /// - `Err(PanelError::Upstream)` - The panel rejected the user, e.g. a taken username
    pub async fn create(&self, param: &CreatePanelUserParam) -> Result<PanelUser, PanelError> {
        let user: Resource<PanelUser> = self.client.post("users", param).await?;

        Ok(user.attributes)
    }
}
