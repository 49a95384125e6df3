use serde_json::json;

use crate::server::error::panel::PanelError;

use super::*;

/// Tests the full provisioning sequence.
///
/// Verifies that the server is created for the resolved panel user on the
/// selected allocation and that the panel's attributes are returned.
///
/// Expected: Ok(attributes) and one server creation request
#[tokio::test]
async fn provisions_server() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_user(5, fixture::DISCORD_ID)
        .with_node(1, &[(10, false)])
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let server = ProvisionService::new(&http_client, &config)
        .provision(&identity(), default_param())
        .await?;

    assert_eq!(server["name"], "Nelly_99-bot");
    assert_eq!(server["user"], 5);
    assert_eq!(server["allocation"], 10);

    let requests = panel.server_requests().await;
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["egg"], 16);
    assert_eq!(body["docker_image"], "ghcr.io/parkervcp/yolks:python_3.12");
    assert_eq!(body["environment"]["PY_FILE"], "main.py");
    assert_eq!(body["environment"]["PY_PACKAGES"], "discord.py");
    assert_eq!(body["environment"]["AUTO_UPDATE"], "0");
    assert_eq!(body["allocation"], json!({ "default": 10 }));

    Ok(())
}

/// Tests provisioning without a free allocation.
///
/// Verifies that no server creation is attempted.
///
/// Expected: Err(PanelError::NoAllocationAvailable)
#[tokio::test]
async fn fails_without_allocation() {
    let panel = MockPanel::builder()
        .with_user(5, fixture::DISCORD_ID)
        .with_node(1, &[(10, true)])
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let result = ProvisionService::new(&http_client, &config)
        .provision(&identity(), default_param())
        .await;

    assert!(matches!(
        result,
        Err(AppError::PanelErr(PanelError::NoAllocationAvailable))
    ));
    assert!(panel.server_requests().await.is_empty());
}

/// Tests a rejected server creation after a user was registered.
///
/// Verifies that the panel's error body is carried and the new panel user
/// is left in place.
///
/// Expected: Err(PanelError::Upstream) with the panel's body as details
#[tokio::test]
async fn surfaces_server_creation_failure() {
    let failure = json!({
        "errors": [{
            "code": "ValidationException",
            "status": "422",
            "detail": "The selected egg is invalid."
        }]
    });
    let panel = MockPanel::builder()
        .with_node(1, &[(10, false)])
        .fail_server_creation(axum::http::StatusCode::UNPROCESSABLE_ENTITY, failure.clone())
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let result = ProvisionService::new(&http_client, &config)
        .provision(&identity(), default_param())
        .await;

    match result {
        Err(AppError::PanelErr(PanelError::Upstream {
            status, details, ..
        })) => {
            assert_eq!(status, 422);
            assert_eq!(details, failure);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert_eq!(panel.user_requests().await.len(), 1);
}
