mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TEST_EMAIL;
use common::TEST_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "nicola@example.com",
            "firstName": "Nicola",
            "lastName": "Tesla",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["firstName"], "Nicola");
    assert_eq!(body["data"]["lastName"], "Tesla");
    assert_eq!(body["data"]["emailVerified"], false);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_password_is_stored_as_digest() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;

    let (password_hash,): (String,) =
        sqlx::query_as("SELECT password_hash FROM users WHERE id = $1::uuid")
            .bind(&user_id)
            .fetch_one(&app.db.pool)
            .await
            .expect("Failed to fetch user");

    assert_ne!(password_hash, TEST_PASSWORD);
    assert!(password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register(TEST_EMAIL, TEST_PASSWORD).await;

    let response = app
        .post("/api/users")
        .json(&common::registration_body(TEST_EMAIL, "another_pass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&common::registration_body("not-an-email", TEST_PASSWORD))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_login_issues_token_and_stores_only_digest() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;

    let token = app.login_token(TEST_EMAIL, TEST_PASSWORD).await;
    assert_eq!(token.len(), 43);

    let rows: Vec<(String, String, chrono::DateTime<Utc>)> =
        sqlx::query_as("SELECT hash, scope, expiry FROM tokens WHERE user_id = $1::uuid")
            .bind(&user_id)
            .fetch_all(&app.db.pool)
            .await
            .expect("Failed to fetch tokens");

    assert_eq!(rows.len(), 1);
    let (hash, scope, expiry) = &rows[0];
    assert_eq!(hash, auth::TokenDigest::of(&token).as_str());
    assert_ne!(hash, &token);
    assert_eq!(scope, "authentication");
    assert!(*expiry > Utc::now() + Duration::days(29));
    assert!(*expiry <= Utc::now() + Duration::days(30));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_match() {
    let app = TestApp::spawn().await;
    app.register(TEST_EMAIL, TEST_PASSWORD).await;

    let wrong_password = app.login(TEST_EMAIL, "wrongpass1").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();

    let unknown_email = app.login("nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    app.register(TEST_EMAIL, TEST_PASSWORD).await;
    let token = app.login_token(TEST_EMAIL, TEST_PASSWORD).await;

    sqlx::query("UPDATE tokens SET expiry = NOW() - INTERVAL '1 second'")
        .execute(&app.db.pool)
        .await
        .expect("Failed to expire token");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_requires_own_account() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;
    let other_id = app.register("b@example.com", TEST_PASSWORD).await;
    let token = app.login_token(TEST_EMAIL, TEST_PASSWORD).await;

    let own = app
        .get_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(own.status(), StatusCode::OK);

    let other = app
        .get_authenticated(&format!("/api/users/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(other.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_password_reset_round_trip() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;

    let response = app
        .post("/api/users/password-reset")
        .json(&json!({ "email": TEST_EMAIL }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let reset_token = app
        .notifier
        .token_for(TEST_EMAIL)
        .await
        .expect("Reset token was not delivered");

    let (scope,): (String,) = sqlx::query_as("SELECT scope FROM tokens WHERE hash = $1")
        .bind(auth::TokenDigest::of(&reset_token).as_str())
        .fetch_one(&app.db.pool)
        .await
        .expect("Failed to fetch reset token");
    assert_eq!(scope, "password");

    let response = app
        .post("/api/users/password-reset/confirm")
        .json(&json!({
            "password": "brandnewpass1",
            "resetToken": reset_token,
            "userId": user_id
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let old = app.login(TEST_EMAIL, TEST_PASSWORD).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app.login(TEST_EMAIL, "brandnewpass1").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_user_workflow() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;
    let token = app.login_token(TEST_EMAIL, TEST_PASSWORD).await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({ "firstName": "Augusta", "email": "ada@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["firstName"], "Augusta");
    assert_eq!(body["data"]["lastName"], "Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tokens")
        .fetch_one(&app.db.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_email_change_clears_verification() {
    let app = TestApp::spawn().await;
    let user_id = app.register(TEST_EMAIL, TEST_PASSWORD).await;
    let token = app.login_token(TEST_EMAIL, TEST_PASSWORD).await;

    sqlx::query("UPDATE users SET email_verified = TRUE WHERE id = $1::uuid")
        .bind(&user_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to verify email");

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({ "email": "ada@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["emailVerified"], false);

    let (email_verified,): (bool,) =
        sqlx::query_as("SELECT email_verified FROM users WHERE id = $1::uuid")
            .bind(&user_id)
            .fetch_one(&app.db.pool)
            .await
            .expect("Failed to fetch user");
    assert!(!email_verified);
}
