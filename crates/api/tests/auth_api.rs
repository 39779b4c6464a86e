//! HTTP-level tests for signup, login, refresh, profile and the admin gate.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_auth, post_json, post_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_creates_student_and_signs_in(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "username": "asha",
        "email": "Asha@Example.com",
        "password": "long-enough-pw",
    });

    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["role"], "student");
    assert_eq!(json["user"]["email"], "asha@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "username": "ravi", "email": "ravi@example.com", "password": "short" });

    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_duplicate_username_is_409(pool: PgPool) {
    create_user(&pool, "taken", "student").await;
    let app = common::build_test_app(pool);
    let body = json!({ "username": "taken", "email": "other@example.com", "password": "long-enough-pw" });

    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_then_refresh_rotates_tokens(pool: PgPool) {
    create_user(&pool, "meera", "student").await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "meera", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    let refresh_token = first["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_ne!(second["refresh_token"], first["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    create_user(&pool, "locky", "student").await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let response = login(app.clone(), "locky", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(app, "locky", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_profile(pool: PgPool) {
    let (user, token) = create_user(&pool, "profile", "student").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["username"], "profile");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_returns_204(pool: PgPool) {
    let (_user, token) = create_user(&pool, "leaver", "student").await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/v1/auth/logout", &token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_opens_for_admin(pool: PgPool) {
    let (_admin, token) = create_user(&pool, "boss", "admin").await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/auth/gate", &token).await).await;

    assert_eq!(json["state"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_uses_stored_role_not_claim(pool: PgPool) {
    let (student, _) = create_user(&pool, "pretender", "student").await;
    let forged_claim = common::token_for(student.id, "admin");
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/auth/gate", &forged_claim).await).await;

    assert_eq!(json["state"], "not_admin");
    assert_eq!(json["redirect"], "/auth");
}

#[tokio::test]
async fn gate_failed_lookup_redirects() {
    let app = common::build_test_app(common::unreachable_pool());
    let token = common::token_for(1, "admin");

    let response = get_auth(app, "/api/v1/auth/gate", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"], "not_admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let (user, _) = create_user(&pool, "gone", "student").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = login(app, "gone", TEST_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

async fn demote_to_student(pool: &PgPool, user_id: i64) {
    sqlx::query("UPDATE users SET role_id = (SELECT id FROM roles WHERE name = 'student') WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn demoted_admin_loses_admin_routes_with_old_token(pool: PgPool) {
    let (admin, token) = create_user(&pool, "former-boss", "admin").await;
    let app = common::build_test_app(pool.clone());
    let body = json!({ "name": "Before demotion" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/batches", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    demote_to_student(&pool, admin.id).await;

    let gate = body_json(get_auth(app.clone(), "/api/v1/auth/gate", &token).await).await;
    assert_eq!(gate["state"], "not_admin");
    let body = json!({ "name": "After demotion" });
    let response = post_json_auth(app, "/api/v1/admin/batches", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn demoted_admin_cannot_play_locked_lectures(pool: PgPool) {
    let (admin, token) = create_user(&pool, "ex-admin", "admin").await;
    let app = common::build_test_app(pool.clone());
    let batch = body_json(
        post_json_auth(app.clone(), "/api/v1/admin/batches", json!({ "name": "Physics" }), &token)
            .await,
    )
    .await;
    let lecture = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/admin/lectures",
            json!({
                "batch_id": batch["data"]["id"],
                "title": "Kinematics",
                "video_url": "https://video.test/k.mp4",
                "is_locked": true,
            }),
            &token,
        )
        .await,
    )
    .await;
    let playback = format!("/api/v1/lectures/{}/playback", lecture["data"]["id"]);
    assert_eq!(get_auth(app.clone(), &playback, &token).await.status(), StatusCode::OK);

    demote_to_student(&pool, admin.id).await;

    assert_eq!(get_auth(app, &playback, &token).await.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forged_admin_claim_cannot_create_batches(pool: PgPool) {
    let (student, _) = create_user(&pool, "claims-admin", "student").await;
    let forged = common::token_for(student.id, "admin");
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/v1/admin/batches", json!({ "name": "Nope" }), &forged).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
