//! HTTP-level tests for timed content access.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{DateTime, Utc};
use common::{body_json, create_user, post_auth, post_json_auth, send};
use edupass_db::repositories::AccessGrantRepo;
use serde_json::json;
use sqlx::PgPool;

fn parse_ts(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn grant_issues_24_hour_window(pool: PgPool) {
    let (user, token) = create_user(&pool, "granted", "student").await;
    let app = common::build_test_app(pool.clone());

    let response = post_auth(app, "/api/v1/access/grant", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let window = parse_ts(&json["expiresAt"]) - parse_ts(&json["grantedAt"]);
    assert_eq!(window, chrono::Duration::hours(24));
    assert_eq!(json["remainingHours"], 24);
    assert!(json["accessToken"].is_string());

    let grant = AccessGrantRepo::find_by_user(&pool, user.id).await.unwrap();
    assert!(grant.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_grants_keep_one_row(pool: PgPool) {
    let (user, token) = create_user(&pool, "clicker", "student").await;
    let app = common::build_test_app(pool.clone());

    post_auth(app.clone(), "/api/v1/access/grant", &token).await;
    post_auth(app, "/api/v1/access/grant", &token).await;

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_grants WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_without_grant_reports_none(pool: PgPool) {
    let (_user, token) = create_user(&pool, "fresh", "student").await;
    let app = common::build_test_app(pool);

    let json = body_json(post_auth(app, "/api/v1/access/check", &token).await).await;

    assert_eq!(json["hasAccess"], false);
    assert_eq!(json["source"], "none");
    assert_eq!(json["remainingHours"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_with_cached_token_skips_database(pool: PgPool) {
    let (_user, token) = create_user(&pool, "cached", "student").await;
    let app = common::build_test_app(pool);
    let grant = body_json(post_auth(app.clone(), "/api/v1/access/grant", &token).await).await;

    let body = json!({ "token": grant["accessToken"] });
    let json = body_json(post_json_auth(app, "/api/v1/access/check", body, &token).await).await;

    assert_eq!(json["hasAccess"], true);
    assert_eq!(json["source"], "token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_accepts_token_in_header(pool: PgPool) {
    let (_user, token) = create_user(&pool, "header", "student").await;
    let app = common::build_test_app(pool);
    let grant = body_json(post_auth(app.clone(), "/api/v1/access/grant", &token).await).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/access/check")
        .header("authorization", format!("Bearer {token}"))
        .header("x-access-token", grant["accessToken"].as_str().unwrap())
        .body(Body::empty())
        .unwrap();
    let json = body_json(send(app, request).await).await;

    assert_eq!(json["source"], "token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn someone_elses_token_falls_back_to_database(pool: PgPool) {
    let (_owner, owner_token) = create_user(&pool, "owner", "student").await;
    let (_other, other_token) = create_user(&pool, "borrower", "student").await;
    let app = common::build_test_app(pool);
    let grant = body_json(post_auth(app.clone(), "/api/v1/access/grant", &owner_token).await).await;

    let body = json!({ "token": grant["accessToken"] });
    let json =
        body_json(post_json_auth(app, "/api/v1/access/check", body, &other_token).await).await;

    assert_eq!(json["hasAccess"], false);
    assert_eq!(json["source"], "none");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_grant_reports_no_access(pool: PgPool) {
    let (user, token) = create_user(&pool, "lapsed", "student").await;
    let past = Utc::now() - chrono::Duration::hours(30);
    AccessGrantRepo::upsert(&pool, user.id, past, past + chrono::Duration::hours(24))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(post_auth(app, "/api/v1/access/check", &token).await).await;

    assert_eq!(json["hasAccess"], false);
    assert_eq!(json["source"], "database");
    assert_eq!(json["remainingHours"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_then_verify_unlocks_once(pool: PgPool) {
    let (_user, token) = create_user(&pool, "verifier", "student").await;
    let app = common::build_test_app(pool);

    let link = body_json(post_auth(app.clone(), "/api/v1/access/request", &token).await).await;
    let code = link["token"].as_str().unwrap().to_string();
    assert_eq!(
        link["shortLink"],
        format!("https://portal.test/verify/{code}")
    );

    let body = json!({ "token": code });
    let response = post_json_auth(app.clone(), "/api/v1/access/verify", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["remainingHours"], 24);

    let response = post_json_auth(app, "/api/v1/access/verify", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_rejects_another_users_link(pool: PgPool) {
    let (_a, token_a) = create_user(&pool, "requester", "student").await;
    let (_b, token_b) = create_user(&pool, "interloper", "student").await;
    let app = common::build_test_app(pool);

    let link = body_json(post_auth(app.clone(), "/api/v1/access/request", &token_a).await).await;
    let body = json!({ "token": link["token"] });

    let response = post_json_auth(app, "/api/v1/access/verify", body, &token_b).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_verification_token_is_400(pool: PgPool) {
    let (_user, token) = create_user(&pool, "typo", "student").await;
    let app = common::build_test_app(pool);

    let body = json!({ "token": "short" });
    let response = post_json_auth(app, "/api/v1/access/verify", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grant_failure_returns_retry_message() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, "student");

    let response = post_auth(app, "/api/v1/access/grant", &token).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to grant access. Please try again.");
}
