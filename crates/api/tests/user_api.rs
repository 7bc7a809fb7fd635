//! Integration tests for user administration and the recipient directory
//! filters.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn create_plant(app: &Router, name: &str) -> i64 {
    let response = post_json(app.clone(), "/api/v1/plants", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_user(app: &Router, plant_id: i64, name: &str, email: &str, role: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "plant_id": plant_id, "name": name, "email": email, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let plant_id = create_plant(&app, "Timisoara").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "plant_id": plant_id, "name": "Ana", "email": "ana@x.com", "role": "manager" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_email_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let plant_id = create_plant(&app, "Timisoara").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "plant_id": plant_id, "name": "Ana", "email": "not-an-email", "role": "technician" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_filters_by_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let plant_id = create_plant(&app, "Timisoara").await;
    create_user(&app, plant_id, "Ana", "ana@x.com", "technician").await;
    create_user(&app, plant_id, "Dan", "dan@x.com", "engineer").await;

    let response = get(
        app.clone(),
        &format!("/api/v1/users?plant_id={plant_id}&role=technician"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "ana@x.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_user_leaves_the_directory(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let plant_id = create_plant(&app, "Timisoara").await;
    let user_id = create_user(&app, plant_id, "Ana", "ana@x.com", "technician").await;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/users/{user_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The directory query no longer returns the deactivated address.
    let emails =
        fixtrack_db::repositories::UserRepo::emails_for_plant_role(&pool, "Timisoara", "technician")
            .await
            .unwrap();
    assert!(emails.is_empty());
}
