//! Bot server provisioning on the hosting panel.
//!
//! Provisioning is a fixed sequence of panel calls: resolve (or register) the panel user
//! linked to the Discord identity, pick the first free allocation across all nodes, then
//! create the server. Steps run one after another and a failure aborts the sequence
//! without undoing earlier steps.

use dioxus_logger::tracing;
use rand::distr::{Alphanumeric, SampleString};
use serde_json::Value;

use crate::server::{
    config::PanelConfig,
    data::panel::{NodeRepository, PanelClient, PanelUserRepository, ServerRepository},
    error::{panel::PanelError, AppError},
    model::{
        identity::Identity,
        panel::{Allocation, CreatePanelUserParam},
        provision::ProvisionServerParam,
    },
};

const PANEL_USER_LAST_NAME: &str = "Bot";
const PANEL_PASSWORD_LEN: usize = 16;

pub struct ProvisionService<'a> {
    client: PanelClient<'a>,
    config: &'a PanelConfig,
}

impl<'a> ProvisionService<'a> {
    /// Creates a new ProvisionService.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `config` - Panel connection and server template settings
    pub fn new(http_client: &'a reqwest::Client, config: &'a PanelConfig) -> Self {
        Self {
            client: PanelClient::new(http_client, config),
            config,
        }
    }

    /// Provisions a bot server for the given identity.
    ///
    /// # Arguments
    /// - `identity` - Discord identity of the requesting user
    /// - `param` - Validated provisioning parameters
    ///
    /// # Returns
    /// - `Ok(Value)` - Attributes of the created panel server
    /// - `Err(AppError::PanelErr(NoAllocationAvailable))` - No node has a free allocation;
    ///   no server creation is attempted
    /// - `Err(AppError::PanelErr(_))` - A panel call failed
    pub async fn provision(
        &self,
        identity: &Identity,
        param: ProvisionServerParam,
    ) -> Result<Value, AppError> {
        let panel_user_id = self.find_or_create_user(identity).await?;

        let Some(allocation) = self.find_free_allocation().await? else {
            tracing::warn!(
                "No free allocation available for Discord user {}",
                identity.id
            );
            return Err(PanelError::NoAllocationAvailable.into());
        };

        tracing::debug!(
            "Selected allocation {} ({}:{}) for Discord user {}",
            allocation.id,
            allocation.ip,
            allocation.port,
            identity.id
        );

        let server_param = param.into_panel_server(
            identity,
            panel_user_id,
            allocation.id,
            self.config.egg_id,
            &self.config.docker_image,
        );

        let server = ServerRepository::new(self.client)
            .create(&server_param)
            .await?;

        tracing::info!(
            "Created server {} for Discord user {} (panel user {})",
            server_param.name,
            identity.id,
            panel_user_id
        );

        Ok(server)
    }

    /// Resolves the panel user linked to the identity, registering one if needed.
    ///
    /// A failed lookup is logged and handled as if no user exists.
    ///
    /// # Returns
    /// - `Ok(u64)` - Panel id of the existing or newly created user
    /// - `Err(PanelError)` - User creation failed
    pub async fn find_or_create_user(&self, identity: &Identity) -> Result<u64, PanelError> {
        let user_repo = PanelUserRepository::new(self.client);

        match user_repo.find_by_external_id(&identity.id).await {
            Ok(Some(user)) => return Ok(user.id),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    "Failed to look up panel user for Discord user {}: {}",
                    identity.id,
                    err
                );
            }
        }

        let user = user_repo
            .create(&CreatePanelUserParam {
                username: identity.panel_username(),
                email: identity.email.clone(),
                first_name: identity.username.clone(),
                last_name: PANEL_USER_LAST_NAME.to_string(),
                external_id: identity.id.clone(),
                password: generate_password(),
            })
            .await?;

        tracing::info!(
            "Created panel user {} for Discord user {}",
            user.id,
            identity.id
        );

        Ok(user.id)
    }

    /// Finds the first unassigned allocation, scanning nodes in listing order.
    ///
    /// # Returns
    /// - `Ok(Some(Allocation))` - First free allocation on the first node that has one
    /// - `Ok(None)` - No node has a free allocation, or there are no nodes
    /// - `Err(PanelError)` - A node or allocation listing failed
    pub async fn find_free_allocation(&self) -> Result<Option<Allocation>, PanelError> {
        let node_repo = NodeRepository::new(self.client);

        for node in node_repo.get_all().await? {
            if let Some(allocation) = node_repo.first_free_allocation(node.id).await? {
                return Ok(Some(allocation));
            }
        }

        Ok(None)
    }
}

/// Random password for a newly registered panel user.
///
/// Users never sign in to the panel with it; the panel only requires one to be set.
fn generate_password() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), PANEL_PASSWORD_LEN)
}
