//! HTTP-level tests for the inquiry, contact and business enquiry workflows.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, delete_auth, get_auth, post_json, post_json_auth,
    put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_product(pool: &PgPool, token: &str, external_id: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/products",
        json!({
            "id": external_id,
            "name": "Carbon Pro",
            "brand": "Arai",
            "price": 499.0,
            "year": "2024",
            "image": "/img/carbon.png",
            "description": "Lightweight shell",
            "category": "premium"
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Business enquiries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn business_enquiry_is_created_pending(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/business-enquiries",
        json!({
            "enquiryType": "wholesale",
            "companyName": "Acme",
            "contactName": "Jo",
            "email": "jo@acme.com",
            "phone": "555",
            "country": "US",
            "message": "hi"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["enquiryType"], "wholesale");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn business_enquiry_rejects_unknown_type(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/business-enquiries",
        json!({
            "enquiryType": "retail",
            "companyName": "Acme",
            "contactName": "Jo",
            "email": "jo@acme.com",
            "phone": "555",
            "country": "US",
            "message": "hi"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "enquiryType");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn business_enquiry_rejects_email_without_dotted_domain(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/business-enquiries",
        json!({
            "enquiryType": "distribution",
            "companyName": "Acme",
            "contactName": "Jo",
            "email": "jo@acme",
            "phone": "555",
            "country": "US",
            "message": "hi"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "email");
    assert_eq!(json["errors"][0]["message"], "Please provide a valid email");

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM business_enquiries")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_supplied_status_is_ignored(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/contacts",
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "subject": "Hi",
            "message": "Hello",
            "status": "resolved"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_status_outside_enum_is_rejected_and_unchanged(pool: PgPool) {
    let token = admin_token(&pool).await;
    let created = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/contacts",
            json!({ "name": "Jo", "email": "jo@example.com", "subject": "Hi", "message": "Hello" }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/contacts/{id}/status"),
        json!({ "status": "archived" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["errors"][0]["field"], "status");
    assert_eq!(json["errors"][0]["message"], "Invalid status");

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/contacts/{id}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_status_transitions_are_free(pool: PgPool) {
    let token = admin_token(&pool).await;
    let created = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/contacts",
            json!({ "name": "Jo", "email": "jo@example.com", "subject": "Hi", "message": "Hello" }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    for status in ["resolved", "pending", "replied"] {
        let response = put_json_auth(
            build_test_app(pool.clone()),
            &format!("/api/contacts/{id}/status"),
            json!({ "status": status }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["status"], status);
    }

    let list = body_json(
        get_auth(
            build_test_app(pool.clone()),
            "/api/contacts?status=replied",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(list["count"], 1);

    let bad_filter = get_auth(
        build_test_app(pool),
        "/api/contacts?status=archived",
        &token,
    )
    .await;
    assert_eq!(bad_filter.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_update_on_missing_submission_is_404(pool: PgPool) {
    let token = admin_token(&pool).await;
    let response = put_json_auth(
        build_test_app(pool),
        "/api/inquiries/999999/status",
        json!({ "status": "resolved" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Inquiries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn inquiry_by_external_id_carries_product_projection(pool: PgPool) {
    let token = admin_token(&pool).await;
    let product_id = create_product(&pool, &token, "ext-123").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/inquiries",
        json!({
            "name": "Sam",
            "email": "sam@example.com",
            "phone": "555-0100",
            "productId": "ext-123"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created.get("warnings").is_none());
    let id = created["data"]["id"].as_i64().unwrap();

    let fetched = body_json(
        get_auth(
            build_test_app(pool),
            &format!("/api/inquiries/{id}"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(fetched["data"]["productId"], product_id);
    assert_eq!(fetched["data"]["product"]["externalId"], "ext-123");
    assert_eq!(fetched["data"]["product"]["name"], "Carbon Pro");
    assert_eq!(fetched["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inquiry_by_numeric_system_id_resolves(pool: PgPool) {
    let token = admin_token(&pool).await;
    let product_id = create_product(&pool, &token, "ext-777").await;

    let response = post_json(
        build_test_app(pool),
        "/api/inquiries",
        json!({
            "name": "Sam",
            "email": "sam@example.com",
            "phone": "555",
            "productId": product_id
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["productId"], product_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unresolved_product_reference_warns_but_succeeds(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/inquiries",
        json!({
            "name": "Sam",
            "email": "sam@example.com",
            "phone": "555",
            "productId": "does-not-exist"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["productId"].is_null());
    assert!(json["data"]["product"].is_null());
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inquiry_requires_name_email_and_phone(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/inquiries",
        json!({ "email": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let fields: Vec<String> = body_json(response).await["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["email", "name", "phone"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inquiry_list_is_newest_first_and_delete_removes(pool: PgPool) {
    let token = admin_token(&pool).await;
    for name in ["First", "Second"] {
        post_json(
            build_test_app(pool.clone()),
            "/api/inquiries",
            json!({ "name": name, "email": "a@b.com", "phone": "1" }),
        )
        .await;
    }

    let list =
        body_json(get_auth(build_test_app(pool.clone()), "/api/inquiries", &token).await).await;
    assert_eq!(list["count"], 2);
    assert_eq!(list["data"][0]["name"], "Second");
    let id = list["data"][0]["id"].as_i64().unwrap();

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/inquiries/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/inquiries/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
