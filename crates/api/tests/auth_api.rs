//! HTTP-level tests for registration, login, `/auth/me` and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, get, get_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use std::time::Instant;
use storefront_api::bootstrap::{ensure_admin, AdminProvisioning};
use storefront_api::config::AdminBootstrap;
use storefront_db::repositories::UserRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_role_account(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/auth/register",
        json!({ "name": " Dana ", "email": "Dana@Example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].as_str().is_some());
    assert_eq!(json["data"]["user"]["email"], "dana@example.com");
    assert_eq!(json["data"]["user"]["name"], "Dana");
    assert_eq!(json["data"]["user"]["role"], "user");
    assert!(json["data"]["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password_and_bad_email(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/auth/register",
        json!({ "name": "Dana", "email": "not-an-email", "password": "123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    create_user(&pool, "taken@example.com", "user").await;
    let response = post_json(
        build_test_app(pool),
        "/api/auth/register",
        json!({ "name": "Other", "email": "taken@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_then_me(pool: PgPool) {
    create_user(&pool, "kim@example.com", "admin").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": "KIM@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["user"]["role"], "admin");

    let response = get_auth(build_test_app(pool), "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "kim@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    create_user(&pool, "kim@example.com", "user").await;

    let wrong_password = post_json(
        build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": "kim@example.com", "password": "nope-nope" }),
    )
    .await;
    let unknown_email = post_json(
        build_test_app(pool),
        "/api/auth/login",
        json!({ "email": "ghost@example.com", "password": "nope-nope" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_email_login_still_pays_for_a_hash_check(pool: PgPool) {
    create_user(&pool, "kim@example.com", "user").await;
    let attempt = |email: &'static str| {
        let app = build_test_app(pool.clone());
        async move {
            let started = Instant::now();
            let response = post_json(
                app,
                "/api/auth/login",
                json!({ "email": email, "password": "nope-nope" }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            started.elapsed()
        }
    };

    // Warm both paths so one-time setup is not measured.
    attempt("kim@example.com").await;
    attempt("ghost@example.com").await;

    let wrong_password = attempt("kim@example.com").await;
    let unknown_email = attempt("ghost@example.com").await;
    assert!(
        unknown_email * 4 >= wrong_password,
        "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_token(pool: PgPool) {
    let missing = get(build_test_app(pool.clone()), "/api/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(missing).await["code"], "UNAUTHORIZED");

    let garbage = get_auth(build_test_app(pool), "/api/auth/me", "not-a-token").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_of_deleted_user_is_rejected(pool: PgPool) {
    let (user, token) = create_user(&pool, "gone@example.com", "admin").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(build_test_app(pool), "/api/inquiries", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_anonymous_and_non_admin(pool: PgPool) {
    let anonymous = get(build_test_app(pool.clone()), "/api/inquiries").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let (_, token) = create_user(&pool, "user@example.com", "user").await;
    let forbidden = get_auth(build_test_app(pool), "/api/inquiries", &token).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(forbidden).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_bootstrap_creates_then_promotes(pool: PgPool) {
    let config = AdminBootstrap {
        name: "Root".to_string(),
        email: "Root@Example.com".to_string(),
        password: "rootpass".to_string(),
    };

    assert_eq!(
        ensure_admin(&pool, &config).await.unwrap(),
        AdminProvisioning::Created
    );
    assert_eq!(
        ensure_admin(&pool, &config).await.unwrap(),
        AdminProvisioning::AlreadyAdmin
    );

    let (user, _) = create_user(&pool, "promote@example.com", "user").await;
    let promote = AdminBootstrap {
        email: "promote@example.com".to_string(),
        ..config
    };
    assert_eq!(
        ensure_admin(&pool, &promote).await.unwrap(),
        AdminProvisioning::Promoted
    );
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, "admin");
}
