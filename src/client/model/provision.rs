use crate::{client::model::error::ApiError, model::server::CreateServerResponseDto};

/// Progress of the dashboard's "Create Bot Server" action.
#[derive(Clone, PartialEq, Default)]
pub enum ProvisionState {
    #[default]
    Idle,
    Creating,
    Created(CreateServerResponseDto),
    Failed(ApiError),
}

impl ProvisionState {
    pub fn is_creating(&self) -> bool {
        matches!(self, ProvisionState::Creating)
    }
}
