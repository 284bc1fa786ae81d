//! End-to-end tests: the typed client against a live router on a local port.

use std::sync::Arc;

use assert_matches::assert_matches;
use sqlx::PgPool;
use storefront_api::auth::jwt::JwtConfig;
use storefront_api::bootstrap::ensure_admin;
use storefront_api::config::{AdminBootstrap, ServerConfig};
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_client::dashboard;
use storefront_client::types::{NewInquiry, NewProduct, NewSale, SaleQuery};
use storefront_client::{ApiClient, ClientError};
use storefront_core::product::ProductCategory;
use storefront_core::submission::InquiryStatus;

const ADMIN_EMAIL: &str = "admin@shop.test";
const ADMIN_PASSWORD: &str = "admin-pass";

/// Serve the full router on an ephemeral port and return its `/api` root.
async fn spawn_server(pool: PgPool) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        cors_origins: vec![],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "client-test-secret".to_string(),
            expiry_hours: 1,
        },
        admin: None,
    };
    ensure_admin(
        &pool,
        &AdminBootstrap {
            name: "Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    let app = build_app_router(AppState {
        pool,
        config: Arc::new(config),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn helmet(external_id: &str) -> NewProduct {
    NewProduct {
        external_id: external_id.to_string(),
        name: "Carbon Pro".to_string(),
        brand: "Arai".to_string(),
        price: 400.0,
        year: "2024".to_string(),
        image: "/img/carbon.png".to_string(),
        description: "Lightweight shell".to_string(),
        features: vec!["MIPS".to_string()],
        category: ProductCategory::Premium,
        stock: Some(3),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_logout_and_restore(pool: PgPool) {
    let base = spawn_server(pool).await;
    let mut client = ApiClient::new(base.clone());

    let token = client
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap()
        .token
        .clone();
    assert!(client.session().unwrap().is_admin());
    assert_eq!(client.me().await.unwrap().email, ADMIN_EMAIL);

    assert!(client.logout().is_some());
    assert_matches!(client.me().await, Err(ClientError::NotAuthenticated));

    // A stored admin token is accepted again.
    let mut fresh = ApiClient::new(base.clone());
    assert!(fresh.restore(token).await.is_some());

    // A garbage token and a non-admin token are both dropped.
    let mut other = ApiClient::new(base);
    assert!(other.restore("not-a-token".to_string()).await.is_none());
    let registered = other
        .register("Shopper", "shopper@shop.test", "shopper-pass")
        .await
        .unwrap();
    assert!(other.restore(registered.token).await.is_none());
    assert!(other.session().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_errors_carry_status_and_field_errors(pool: PgPool) {
    let base = spawn_server(pool).await;
    let mut client = ApiClient::new(base);

    let err = client.login(ADMIN_EMAIL, "wrong-password").await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let err = client
        .create_sale(&NewSale {
            product_id: 424242,
            customer_name: "Kim".to_string(),
            customer_email: "kim@shop.test".to_string(),
            quantity: 1,
            unit_price: 10.0,
            total_amount: 10.0,
            sale_date: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Api { status: 400, errors, .. } => {
        assert_eq!(errors[0].field, "productId");
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_reflects_catalog_submissions_and_sales(pool: PgPool) {
    let base = spawn_server(pool).await;
    let mut client = ApiClient::new(base);
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let product = client.create_product(&helmet("ext-1")).await.unwrap();
    client.create_product(&helmet("ext-2")).await.unwrap();
    client.delete_product("ext-2").await.unwrap();

    let accepted = client
        .submit_inquiry(&NewInquiry {
            name: "Sam".to_string(),
            email: "sam@shop.test".to_string(),
            phone: "555-0100".to_string(),
            message: None,
            product_id: Some("ext-1".to_string()),
        })
        .await
        .unwrap();
    assert!(accepted.warnings.is_empty());
    assert_eq!(accepted.record.product.as_ref().unwrap().id, product.id);

    let second = client
        .submit_inquiry(&NewInquiry {
            name: "Lee".to_string(),
            email: "lee@shop.test".to_string(),
            phone: "555-0101".to_string(),
            message: Some("Do you ship abroad?".to_string()),
            product_id: Some("no-such-product".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(second.warnings.len(), 1);
    client
        .set_inquiry_status(second.record.id, InquiryStatus::Contacted)
        .await
        .unwrap();

    client
        .create_sale(&NewSale {
            product_id: product.id,
            customer_name: "Sam".to_string(),
            customer_email: "sam@shop.test".to_string(),
            quantity: 2,
            unit_price: 400.0,
            total_amount: 800.0,
            sale_date: None,
            status: None,
        })
        .await
        .unwrap();

    let summary = dashboard::load(&client).await.unwrap();
    assert_eq!(summary.total_products, 1);
    assert_eq!(summary.total_inquiries, 2);
    assert_eq!(summary.pending_inquiries, 1);
    assert_eq!(summary.total_contacts, 0);
    assert_eq!(summary.total_sales, 800.0);
    assert_eq!(summary.current_month_sales, 800.0);
    assert_eq!(summary.daily_sales.len(), 7);
    assert_eq!(summary.daily_sales[6].count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_zeroes_sales_when_stats_fail(pool: PgPool) {
    let base = spawn_server(pool.clone()).await;
    let mut client = ApiClient::new(base);
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    client.create_product(&helmet("ext-1")).await.unwrap();

    // Stats now fail with a server error while every list endpoint still works.
    sqlx::query("DROP TABLE sales").execute(&pool).await.unwrap();
    let err = client.sales_stats(&SaleQuery::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let summary = dashboard::load(&client).await.unwrap();
    assert_eq!(summary.total_products, 1);
    assert_eq!(summary.total_inquiries, 0);
    assert_eq!(summary.total_sales, 0.0);
    assert_eq!(summary.current_month_sales, 0.0);
    assert!(summary.monthly_sales.is_empty());
    assert_eq!(summary.daily_sales.len(), 7);
    assert!(summary
        .daily_sales
        .iter()
        .all(|point| point.total == 0.0 && point.count == 0));
}
