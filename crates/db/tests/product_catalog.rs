//! Integration tests for the product catalog repository: visibility
//! scopes, exact-match filters, partial updates and retirement.

use assert_matches::assert_matches;
use sqlx::PgPool;
use storefront_core::product::{ProductCategory, ProductFilter, ProductLifecycle, Visibility};
use storefront_db::models::product::{CreateProduct, UpdateProduct};
use storefront_db::repositories::ProductRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(external_id: &str, brand: &str, category: &str) -> CreateProduct {
    CreateProduct {
        external_id: external_id.to_string(),
        name: format!("{brand} {external_id}"),
        brand: brand.to_string(),
        price: Some(199.0),
        year: "2024".to_string(),
        image: "/img/p.png".to_string(),
        description: "A product".to_string(),
        features: vec!["Light".to_string()],
        category: category.to_string(),
        stock: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_to_active_with_zero_stock(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("ext-1", "Arai", "premium"))
        .await
        .unwrap();
    assert_eq!(product.external_id, "ext-1");
    assert_eq!(product.category, ProductCategory::Premium);
    assert_eq!(product.stock, 0);
    assert_eq!(product.lifecycle, ProductLifecycle::Active);
    assert_eq!(product.features, vec!["Light".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_external_id_violates_unique_constraint(pool: PgPool) {
    ProductRepo::create(&pool, &new_product("dup", "Arai", "entry"))
        .await
        .unwrap();
    let err = ProductRepo::create(&pool, &new_product("dup", "Shoei", "entry"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) => {
        assert_eq!(db.constraint(), Some("uq_products_external_id"));
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retired_products_are_hidden_from_catalog_scope(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("ext-2", "Arai", "premium"))
        .await
        .unwrap();
    let retired = ProductRepo::set_lifecycle(&pool, product.id, ProductLifecycle::Retired)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retired.lifecycle, ProductLifecycle::Retired);

    let listed = ProductRepo::list_active(&pool, &ProductFilter::default())
        .await
        .unwrap();
    assert!(listed.iter().all(|p| p.id != product.id));

    assert!(ProductRepo::find_by_id(&pool, product.id, Visibility::Catalog)
        .await
        .unwrap()
        .is_none());
    assert!(ProductRepo::find_by_external_id(&pool, "ext-2", Visibility::Catalog)
        .await
        .unwrap()
        .is_none());

    let found = ProductRepo::find_by_id(&pool, product.id, Visibility::Any)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.lifecycle, ProductLifecycle::Retired);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_applies_every_present_filter(pool: PgPool) {
    ProductRepo::create(&pool, &new_product("a", "Arai", "premium"))
        .await
        .unwrap();
    ProductRepo::create(&pool, &new_product("b", "Arai", "entry"))
        .await
        .unwrap();
    ProductRepo::create(&pool, &new_product("c", "Shoei", "premium"))
        .await
        .unwrap();

    let all = ProductRepo::list_active(&pool, &ProductFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    // Newest first.
    assert_eq!(all[0].external_id, "c");

    let filter =
        ProductFilter::from_raw(Some("Arai".into()), None, Some("premium".into())).unwrap();
    let arai_premium = ProductRepo::list_active(&pool, &filter).await.unwrap();
    assert_eq!(arai_premium.len(), 1);
    assert_eq!(arai_premium[0].external_id, "a");

    let filter = ProductFilter::from_raw(None, Some("1999".into()), None).unwrap();
    assert!(ProductRepo::list_active(&pool, &filter).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_only_present_fields(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("ext-3", "Arai", "entry"))
        .await
        .unwrap();

    let patch = UpdateProduct {
        price: Some(149.5),
        category: Some("mid-range".into()),
        is_active: Some(false),
        ..Default::default()
    };
    let updated = ProductRepo::update(&pool, product.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price, 149.5);
    assert_eq!(updated.category, ProductCategory::MidRange);
    assert_eq!(updated.lifecycle, ProductLifecycle::Retired);
    assert_eq!(updated.name, product.name);
    assert_eq!(updated.brand, product.brand);

    assert!(ProductRepo::update(&pool, 999_999, &patch).await.unwrap().is_none());
}
