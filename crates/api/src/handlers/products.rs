//! Handlers for the `/products` resource.
//!
//! Reads are public and see only active products, except that an admin
//! token widens `GET /products/{id}` to retired products too. Mutations
//! are admin only. Delete retires the product; rows are never removed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::product::{as_system_id, ProductFilter, ProductLifecycle, Visibility};
use storefront_core::validation::validate_input;
use storefront_db::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};
use storefront_db::repositories::ProductRepo;
use storefront_db::DbPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Look a product up by system id when `raw` is numeric, falling back to
/// the external business id.
pub(crate) async fn resolve_product(
    pool: &DbPool,
    raw: &str,
    visibility: Visibility,
) -> Result<Option<Product>, sqlx::Error> {
    if let Some(id) = as_system_id(raw) {
        if let Some(product) = ProductRepo::find_by_id(pool, id, visibility).await? {
            return Ok(Some(product));
        }
    }
    ProductRepo::find_by_external_id(pool, raw.trim(), visibility).await
}

async fn require_product(
    pool: &DbPool,
    raw: &str,
    visibility: Visibility,
) -> AppResult<Product> {
    resolve_product(pool, raw, visibility)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", raw).into())
}

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

/// List active products, newest first, filtered by brand, year and category.
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ProductFilter::from_raw(params.brand, params.year, params.category)?;
    let products = ProductRepo::list_active(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(products)))
}

// ---------------------------------------------------------------------------
// GET /products/{id}
// ---------------------------------------------------------------------------

pub async fn get_product(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let visibility = if viewer.is_admin() {
        Visibility::Any
    } else {
        Visibility::Catalog
    };
    let product = require_product(&state.pool, &id, visibility).await?;
    Ok(Json(ApiResponse::new(product)))
}

// ---------------------------------------------------------------------------
// POST /products
// ---------------------------------------------------------------------------

pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(
        product_id = product.id,
        external_id = %product.external_id,
        user_id = admin.user_id,
        "Product created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(product).with_message("Product created successfully")),
    ))
}

// ---------------------------------------------------------------------------
// PUT /products/{id}
// ---------------------------------------------------------------------------

/// Partial update. Works on retired products too; `isActive` restores them.
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let current = require_product(&state.pool, &id, Visibility::Any).await?;
    let updated = ProductRepo::update(&state.pool, current.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", current.id))?;

    tracing::info!(
        product_id = updated.id,
        is_active = updated.lifecycle.is_active(),
        user_id = admin.user_id,
        "Product updated",
    );

    Ok(Json(
        ApiResponse::new(updated).with_message("Product updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /products/{id}
// ---------------------------------------------------------------------------

/// Retire a product. It disappears from the catalog but stays resolvable
/// for admins and for existing inquiries and sales.
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let current = require_product(&state.pool, &id, Visibility::Any).await?;
    let retired = ProductRepo::set_lifecycle(&state.pool, current.id, ProductLifecycle::Retired)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", current.id))?;

    tracing::info!(
        product_id = retired.id,
        user_id = admin.user_id,
        "Product retired",
    );

    Ok(Json(
        ApiResponse::new(retired).with_message("Product deleted successfully"),
    ))
}
