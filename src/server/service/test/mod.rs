use test_utils::{fixture, panel::MockPanel};

use crate::server::{
    config::PanelConfig,
    error::AppError,
    model::{identity::Identity, provision::ProvisionServerParam},
    service::provision::ProvisionService,
};

mod provision;

fn panel_config(panel: &MockPanel) -> PanelConfig {
    PanelConfig {
        url: panel.url.clone(),
        api_key: panel.api_key.clone(),
        egg_id: 16,
        docker_image: "ghcr.io/parkervcp/yolks:python_3.12".to_string(),
    }
}

fn identity() -> Identity {
    Identity {
        id: fixture::DISCORD_ID.to_string(),
        username: fixture::DISCORD_USERNAME.to_string(),
        email: Some(fixture::DISCORD_EMAIL.to_string()),
        avatar: Some(fixture::DISCORD_AVATAR.to_string()),
    }
}

fn default_param() -> ProvisionServerParam {
    ProvisionServerParam {
        user_uploaded_files: false,
        auto_update: false,
        main_file: "main.py".to_string(),
        extra_packages: "discord.py".to_string(),
    }
}
