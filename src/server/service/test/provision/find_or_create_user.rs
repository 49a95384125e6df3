use super::*;

/// Tests resolving a panel user that already exists.
///
/// Verifies that the user linked to the Discord id is returned and no new
/// user is registered.
///
/// Expected: Ok(5) with no user creation request
#[tokio::test]
async fn returns_existing_user() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_user(4, "1111")
        .with_user(5, fixture::DISCORD_ID)
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let user_id = ProvisionService::new(&http_client, &config)
        .find_or_create_user(&identity())
        .await?;

    assert_eq!(user_id, 5);
    assert!(panel.user_requests().await.is_empty());

    Ok(())
}

/// Tests registering a panel user for a new Discord identity.
///
/// Verifies the registration payload: sanitized username, Discord username as
/// first name, fixed last name, Discord id as external id and a random password.
///
/// Expected: Ok(id) of the created user
#[tokio::test]
async fn creates_missing_user() -> Result<(), AppError> {
    let panel = MockPanel::builder().build().await.unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let user_id = ProvisionService::new(&http_client, &config)
        .find_or_create_user(&identity())
        .await?;

    assert_eq!(user_id, 100);

    let requests = panel.user_requests().await;
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["username"], "nelly99");
    assert_eq!(body["email"], fixture::DISCORD_EMAIL);
    assert_eq!(body["first_name"], fixture::DISCORD_USERNAME);
    assert_eq!(body["last_name"], "Bot");
    assert_eq!(body["external_id"], fixture::DISCORD_ID);

    let password = body["password"].as_str().unwrap();
    assert_eq!(password.len(), 16);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    Ok(())
}

/// Tests registering a panel user for a profile without an email.
///
/// Expected: the registration payload has no email key at all
#[tokio::test]
async fn omits_missing_email() -> Result<(), AppError> {
    let panel = MockPanel::builder().build().await.unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);
    let identity = Identity {
        email: None,
        ..identity()
    };

    ProvisionService::new(&http_client, &config)
        .find_or_create_user(&identity)
        .await?;

    let requests = panel.user_requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].get("email").is_none());
    assert_eq!(requests[0]["external_id"], fixture::DISCORD_ID);

    Ok(())
}

/// Tests that a failing user lookup falls through to registration.
///
/// Expected: Ok(id) of a newly created user
#[tokio::test]
async fn lookup_failure_creates_user() -> Result<(), AppError> {
    let panel = MockPanel::builder()
        .with_user(5, fixture::DISCORD_ID)
        .fail_user_lookup()
        .build()
        .await
        .unwrap();
    let http_client = reqwest::Client::new();
    let config = panel_config(&panel);

    let user_id = ProvisionService::new(&http_client, &config)
        .find_or_create_user(&identity())
        .await?;

    assert_ne!(user_id, 5);
    assert_eq!(panel.user_requests().await.len(), 1);

    Ok(())
}

/// Tests a rejected API key.
///
/// Verifies that a failed registration surfaces the panel's response.
///
/// Expected: Err(PanelError::Upstream) with status 401
#[tokio::test]
async fn fails_when_panel_rejects_key() {
    let panel = MockPanel::builder().build().await.unwrap();
    let http_client = reqwest::Client::new();
    let mut config = panel_config(&panel);
    config.api_key = "wrong".to_string();

    let result = ProvisionService::new(&http_client, &config)
        .find_or_create_user(&identity())
        .await;

    match result {
        Err(crate::server::error::panel::PanelError::Upstream {
            endpoint,
            status,
            details,
        }) => {
            assert_eq!(endpoint, "users");
            assert_eq!(status, 401);
            assert_eq!(details["errors"][0]["code"], "AuthenticationException");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}
