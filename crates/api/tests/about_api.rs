//! Integration tests for about-page sections and their per-type content
//! validation.

mod common;

use axum::http::StatusCode;
use common::{body_json, editor_token, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_valid_hero_section(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/about",
        json!({
            "section_type": "hero",
            "content": { "headline": "We build brands", "subheadline": "Since 2009" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["section_type"], "hero");
    assert_eq!(json["data"]["content"]["headline"], "We build brands");
    assert_eq!(json["data"]["sort_order"], 0);

    let response = get(app, "/api/v1/public/about").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_section_type_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/about",
        json!({ "section_type": "carousel", "content": {} }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn content_not_matching_type_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_token(&pool, app.clone()).await;

    // Team members need a role.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/about",
        json!({
            "section_type": "team",
            "content": { "members": [{ "name": "Ada", "role": "" }] }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown fields are rejected rather than silently stored.
    let response = post_json_auth(
        app,
        "/api/v1/admin/about",
        json!({
            "section_type": "hero",
            "content": { "headline": "Hi", "background_video": "x.mp4" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn changing_type_requires_matching_content(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/about",
        json!({
            "section_type": "hero",
            "content": { "headline": "Hello" }
        }),
        &token,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/admin/about/{id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "section_type": "mission" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({
            "section_type": "mission",
            "content": { "heading": "Why", "statement": "Make good work" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["section_type"], "mission");
    assert_eq!(json["data"]["content"]["statement"], "Make good work");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn section_types_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_token(&pool, app.clone()).await;

    let response = get_auth(app, "/api/v1/admin/about/section-types", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let types = json["data"].as_array().unwrap();
    assert!(types.contains(&json!("hero")));
    assert!(types.contains(&json!("milestones")));
}
