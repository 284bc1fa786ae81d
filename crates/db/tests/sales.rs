//! Integration tests for sale records and the reporting aggregates.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use storefront_core::sale::{daily_window_start, monthly_window_start, SaleFilter, SaleStatus};
use storefront_db::models::product::CreateProduct;
use storefront_db::models::sale::{CreateSale, UpdateSale};
use storefront_db::repositories::{ProductRepo, SaleRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_product(pool: &PgPool) -> i64 {
    let input = CreateProduct {
        external_id: "ext-sale".to_string(),
        name: "Street Pro".to_string(),
        brand: "Shoei".to_string(),
        price: Some(250.0),
        year: "2023".to_string(),
        image: "/img/street.png".to_string(),
        description: "Street helmet".to_string(),
        features: vec![],
        category: "mid-range".to_string(),
        stock: Some(10),
    };
    ProductRepo::create(pool, &input).await.unwrap().id
}

fn new_sale(product_id: i64, total: f64, days_ago: i64, status: Option<&str>) -> CreateSale {
    CreateSale {
        product_id: Some(product_id),
        customer_name: "Kim".to_string(),
        customer_email: "kim@example.com".to_string(),
        quantity: Some(1),
        unit_price: Some(total),
        total_amount: Some(total),
        sale_date: Some(Utc::now() - Duration::days(days_ago)),
        status: status.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_status_and_joins_product(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let mut input = new_sale(product_id, 250.0, 0, None);
    input.sale_date = None;

    let sale = SaleRepo::create(&pool, &input).await.unwrap();
    assert_eq!(sale.status, SaleStatus::Completed);
    assert_eq!(sale.product.external_id, "ext-sale");
    assert!(Utc::now() - sale.sale_date < Duration::minutes(1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_product_fails(pool: PgPool) {
    let result = SaleRepo::create(&pool, &new_sale(424_242, 10.0, 0, None)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_window_and_status(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    SaleRepo::create(&pool, &new_sale(product_id, 100.0, 1, None)).await.unwrap();
    SaleRepo::create(&pool, &new_sale(product_id, 50.0, 3, Some("pending")))
        .await
        .unwrap();
    SaleRepo::create(&pool, &new_sale(product_id, 75.0, 40, None)).await.unwrap();

    let all = SaleRepo::list(&pool, &SaleFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].total_amount, 100.0, "most recent sale first");

    let filter = SaleFilter {
        start_date: Some(Utc::now() - Duration::days(10)),
        end_date: None,
        status: Some(SaleStatus::Completed),
    };
    let recent_completed = SaleRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(recent_completed.len(), 1);
    assert_eq!(recent_completed[0].total_amount, 100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    let sale = SaleRepo::create(&pool, &new_sale(product_id, 100.0, 0, None))
        .await
        .unwrap();

    let patch = UpdateSale {
        status: Some("cancelled".into()),
        quantity: Some(2),
        ..Default::default()
    };
    let updated = SaleRepo::update(&pool, sale.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.status, SaleStatus::Cancelled);
    assert_eq!(updated.quantity, 2);
    assert_eq!(updated.customer_name, sale.customer_name);

    assert!(SaleRepo::delete(&pool, sale.id).await.unwrap());
    assert!(SaleRepo::find_by_id(&pool, sale.id).await.unwrap().is_none());
    assert!(SaleRepo::update(&pool, sale.id, &patch).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregates_count_completed_sales_only(pool: PgPool) {
    let product_id = seed_product(&pool).await;
    SaleRepo::create(&pool, &new_sale(product_id, 100.0, 1, None)).await.unwrap();
    SaleRepo::create(&pool, &new_sale(product_id, 40.0, 1, None)).await.unwrap();
    SaleRepo::create(&pool, &new_sale(product_id, 999.0, 1, Some("cancelled")))
        .await
        .unwrap();
    SaleRepo::create(&pool, &new_sale(product_id, 60.0, 400, None)).await.unwrap();

    let total = SaleRepo::total_completed(&pool, None, None).await.unwrap();
    assert_eq!(total, 200.0);

    let windowed =
        SaleRepo::total_completed(&pool, Some(Utc::now() - Duration::days(30)), None)
            .await
            .unwrap();
    assert_eq!(windowed, 140.0);

    let now = Utc::now();
    let monthly = SaleRepo::monthly_totals(&pool, monthly_window_start(now)).await.unwrap();
    assert_eq!(monthly.iter().map(|m| m.total).sum::<f64>(), 140.0);

    let daily = SaleRepo::daily_totals(&pool, daily_window_start(now)).await.unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].count, 2);
    assert_eq!(daily[0].total, 140.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn totals_are_zero_without_sales(pool: PgPool) {
    assert_eq!(SaleRepo::total_completed(&pool, None, None).await.unwrap(), 0.0);
    assert!(SaleRepo::daily_totals(&pool, daily_window_start(Utc::now()))
        .await
        .unwrap()
        .is_empty());
}
