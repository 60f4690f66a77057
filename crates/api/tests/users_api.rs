//! Integration tests for user administration, role enforcement and the
//! audit trail.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user, delete_auth, editor_token, get_auth, login, post_json,
    post_json_auth, put_json_auth, ADMIN_ROLE_ID, EDITOR_ROLE_ID,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_user_who_can_login(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/users",
        json!({
            "username": "newhire",
            "email": "NewHire@Example.com",
            "password": "a-long-enough-password",
            "role_id": EDITOR_ROLE_ID
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "editor");
    assert_eq!(json["data"]["email"], "newhire@example.com");

    let data = login(app, "newhire", "a-long-enough-password").await;
    assert_eq!(data["user"]["username"], "newhire");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn weak_password_or_bad_email_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/users",
        json!({
            "username": "shortpw",
            "email": "shortpw@example.com",
            "password": "short",
            "role_id": EDITOR_ROLE_ID
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/admin/users",
        json!({
            "username": "bademail",
            "email": "nope",
            "password": "a-long-enough-password",
            "role_id": EDITOR_ROLE_ID
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;
    create_user(&pool, "taken", EDITOR_ROLE_ID).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/users",
        json!({
            "username": "taken",
            "email": "other@example.com",
            "password": "a-long-enough-password",
            "role_id": EDITOR_ROLE_ID
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editor_cannot_manage_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let editor = editor_token(&pool, app.clone()).await;

    let response = get_auth(app.clone(), "/api/v1/admin/users", &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let response = get_auth(app, "/api/v1/admin/audit-logs", &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_admin_cannot_be_demoted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;
    let me = get_auth(app.clone(), "/api/v1/auth/me", &admin).await;
    let admin_id = body_json(me).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{admin_id}"),
        json!({ "role_id": EDITOR_ROLE_ID }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // With a second admin the demotion goes through.
    create_user(&pool, "backup-admin", ADMIN_ROLE_ID).await;
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{admin_id}"),
        json!({ "role_id": EDITOR_ROLE_ID }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "editor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivate_user_revokes_access(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;
    let editor = create_user(&pool, "temp-editor", EDITOR_ROLE_ID).await;
    let session = login(app.clone(), "temp-editor", common::TEST_PASSWORD).await;

    let uri = format!("/api/v1/admin/users/{}", editor.id);
    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": session["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_deactivate_self(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;
    let me = get_auth(app.clone(), "/api/v1/auth/me", &admin).await;
    let admin_id = body_json(me).await["data"]["id"].as_i64().unwrap();

    let response = delete_auth(app, &format!("/api/v1/admin/users/{admin_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_password_changes_credentials(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;
    let editor = create_user(&pool, "forgetful", EDITOR_ROLE_ID).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/reset-password", editor.id),
        json!({ "new_password": "brand-new-password-1" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "forgetful", "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login(app, "forgetful", "brand-new-password-1").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roles_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    let response = get_auth(app, "/api/v1/admin/roles", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "editor"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn content_changes_are_audited(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    post_json_auth(
        app.clone(),
        "/api/v1/admin/faqs",
        json!({ "question": "How long?", "answer": "Six weeks" }),
        &admin,
    )
    .await;

    let response = get_auth(
        app,
        "/api/v1/admin/audit-logs?entity_type=faqs",
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["action_type"], "entity_create");
}
