//! HTTP-level integration tests for login, token refresh, logout and the
//! account lockout policy.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, login, post_json, post_json_auth, ADMIN_ROLE_ID,
    EDITOR_ROLE_ID, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use vitrine_db::repositories::{SessionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_user(pool: PgPool) {
    let user = create_user(&pool, "anna", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let data = login(app, "anna", TEST_PASSWORD).await;

    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["expires_in"], 15 * 60);
    assert_eq!(data["user"]["id"], user.id);
    assert_eq!(data["user"]["username"], "anna");
    assert_eq!(data["user"]["role"], "editor");
    assert!(data["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_accepts_email(pool: PgPool) {
    create_user(&pool, "byemail", ADMIN_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let data = login(app, "byemail@test.com", TEST_PASSWORD).await;
    assert_eq!(data["user"]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "wrongpw", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "wrongpw", "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_user_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "ghost", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_locks_after_repeated_failures(pool: PgPool) {
    let user = create_user(&pool, "locked", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..5 {
        let body = json!({ "username": "locked", "password": "bad-password-here" });
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while locked.
    let body = json!({ "username": "locked", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let row = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(row.locked_until.is_some());
    assert_eq!(row.failed_login_count, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn successful_login_resets_failure_count(pool: PgPool) {
    let user = create_user(&pool, "recovers", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..3 {
        let body = json!({ "username": "recovers", "password": "bad-password-here" });
        post_json(app.clone(), "/api/v1/auth/login", body).await;
    }
    login(app, "recovers", TEST_PASSWORD).await;

    let row = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(row.failed_login_count, 0);
    assert!(row.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_cannot_login(pool: PgPool) {
    let user = create_user(&pool, "gone", EDITOR_ROLE_ID).await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();
    let app = common::build_test_app(pool);

    let body = json!({ "username": "gone", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh, logout, me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_refresh_token(pool: PgPool) {
    create_user(&pool, "rotator", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let data = login(app.clone(), "rotator", TEST_PASSWORD).await;
    let original = data["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    let rotated = refreshed["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, original);
    assert!(refreshed["data"]["access_token"].is_string());

    // The old token was spent by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reusing_a_rotated_token_revokes_every_session(pool: PgPool) {
    let user = create_user(&pool, "replayed", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool.clone());

    let data = login(app.clone(), "replayed", TEST_PASSWORD).await;
    let stolen = data["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": stolen }),
    )
    .await;
    let current = body_json(response).await["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(SessionRepo::count_live_for_user(&pool, user.id).await.unwrap(), 1);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": stolen }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionRepo::count_live_for_user(&pool, user.id).await.unwrap(), 0);

    // The legitimate holder has to log in again.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": current }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_with_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": "not-a-real-token" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    create_user(&pool, "leaver", EDITOR_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let data = login(app.clone(), "leaver", TEST_PASSWORD).await;
    let access = data["access_token"].as_str().unwrap();
    let refresh = data["refresh_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    create_user(&pool, "whoami", ADMIN_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let data = login(app.clone(), "whoami", TEST_PASSWORD).await;
    let access = data["access_token"].as_str().unwrap();

    let response = get_auth(app, "/api/v1/auth/me", access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "whoami");
    assert_eq!(json["data"]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_bearer_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/services", "definitely.not.ajwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
