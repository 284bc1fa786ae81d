//! Repository for the `products` table.
//!
//! Products are never removed: "deleting" flips `is_active` off. Every
//! lookup takes a [`Visibility`] so catalog callers cannot see retired rows.

use sqlx::PgPool;
use storefront_core::product::{ProductFilter, ProductLifecycle, Visibility};
use storefront_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries.
const COLUMNS: &str = "\
    id, external_id, name, brand, price, year, image, description, \
    features, category, stock, is_active, created_at, updated_at";

/// Provides catalog operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new, active product. `stock` defaults to zero.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (external_id, name, brand, price, year, image, description, \
                 features, category, stock) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.external_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(input.price.unwrap_or_default())
            .bind(&input.year)
            .bind(&input.image)
            .bind(&input.description)
            .bind(&input.features)
            .bind(&input.category)
            .bind(input.stock.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a product by system id within the given visibility scope.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND ($2 OR is_active)");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(visibility.includes_retired())
            .fetch_optional(pool)
            .await
    }

    /// Find a product by its external business id within the given scope.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: &str,
        visibility: Visibility,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE external_id = $1 AND ($2 OR is_active)"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(external_id)
            .bind(visibility.includes_retired())
            .fetch_optional(pool)
            .await
    }

    /// List active products matching every present filter field, newest first.
    pub async fn list_active(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["is_active = TRUE".to_string()];
        let mut param_idx: usize = 1;

        if filter.brand.is_some() {
            conditions.push(format!("brand = ${param_idx}"));
            param_idx += 1;
        }
        if filter.year.is_some() {
            conditions.push(format!("year = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE {} ORDER BY created_at DESC, id DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Product>(&query);
        if let Some(brand) = &filter.brand {
            q = q.bind(brand);
        }
        if let Some(year) = &filter.year {
            q = q.bind(year);
        }
        if let Some(category) = filter.category {
            q = q.bind(category.as_str());
        }

        q.fetch_all(pool).await
    }

    /// Apply a partial update. Only non-`None` fields are changed; the
    /// product may be active or retired. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                external_id = COALESCE($2, external_id), \
                name = COALESCE($3, name), \
                brand = COALESCE($4, brand), \
                price = COALESCE($5, price), \
                year = COALESCE($6, year), \
                image = COALESCE($7, image), \
                description = COALESCE($8, description), \
                features = COALESCE($9, features), \
                category = COALESCE($10, category), \
                stock = COALESCE($11, stock), \
                is_active = COALESCE($12, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.external_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(input.price)
            .bind(&input.year)
            .bind(&input.image)
            .bind(&input.description)
            .bind(&input.features)
            .bind(&input.category)
            .bind(input.stock)
            .bind(input.lifecycle().map(ProductLifecycle::is_active))
            .fetch_optional(pool)
            .await
    }

    /// Move a product to the given lifecycle state. Returns `None` if the
    /// product does not exist.
    pub async fn set_lifecycle(
        pool: &PgPool,
        id: DbId,
        lifecycle: ProductLifecycle,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("UPDATE products SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(lifecycle.is_active())
            .fetch_optional(pool)
            .await
    }
}
