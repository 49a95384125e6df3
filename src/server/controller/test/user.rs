use super::*;

/// Tests reading the user without a cookie.
///
/// Expected: 401 Unauthorized
#[tokio::test]
async fn returns_unauthorized_without_cookie() {
    let app = TestApp::spawn(None, None).await;

    let response = app.get("/api/user", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

/// Tests reading the user from a valid identity cookie.
///
/// Expected: 200 with the stored identity
#[tokio::test]
async fn returns_identity() {
    let app = TestApp::spawn(None, None).await;

    let response = app
        .get("/api/user", Some(app.identity_cookie(&identity())))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "id": fixture::DISCORD_ID,
            "username": fixture::DISCORD_USERNAME,
            "email": fixture::DISCORD_EMAIL,
            "avatar": fixture::DISCORD_AVATAR
        })
    );
}

/// Tests a forged identity cookie.
///
/// Verifies that an unsigned cookie with a well-formed identity is ignored.
///
/// Expected: 401 Unauthorized
#[tokio::test]
async fn rejects_unsigned_cookie() {
    let app = TestApp::spawn(None, None).await;
    let forged = Cookie::new(
        "discord_user",
        serde_json::to_string(&identity()).unwrap(),
    )
    .encoded()
    .to_string();

    let response = app.get("/api/user", Some(forged)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Tests a signed cookie whose payload is not an identity.
///
/// Expected: 400 Bad Request
#[tokio::test]
async fn rejects_malformed_identity() {
    let app = TestApp::spawn(None, None).await;

    let response = app
        .get(
            "/api/user",
            Some(app.signed_cookie("discord_user", "{\"id\": 42}")),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid user data" }));
}
