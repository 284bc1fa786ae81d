//! Handlers for sale records and sales statistics. Admin only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use storefront_core::error::{CoreError, FieldError};
use storefront_core::product::Visibility;
use storefront_core::sale::{daily_window_start, monthly_window_start, SaleFilter};
use storefront_core::types::DbId;
use storefront_core::validation::validate_input;
use storefront_db::models::sale::{CreateSale, SaleListParams, SalesStats, UpdateSale};
use storefront_db::repositories::{ProductRepo, SaleRepo};
use storefront_db::DbPool;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// A sale must reference an existing product, active or retired.
async fn ensure_product_exists(pool: &DbPool, product_id: DbId) -> AppResult<()> {
    if ProductRepo::find_by_id(pool, product_id, Visibility::Any)
        .await?
        .is_none()
    {
        return Err(CoreError::InvalidFields(vec![FieldError::new(
            "productId",
            "Product not found",
        )])
        .into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /sales
// ---------------------------------------------------------------------------

pub async fn list_sales(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SaleListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = SaleFilter::from_raw(params.start_date, params.end_date, params.status)?;
    let sales = SaleRepo::list(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::list(sales)))
}

// ---------------------------------------------------------------------------
// GET /sales/stats
// ---------------------------------------------------------------------------

/// Completed-sale total (optionally windowed by `startDate` / `endDate`)
/// plus the trailing monthly and daily series.
pub async fn sales_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SaleListParams>,
) -> AppResult<impl IntoResponse> {
    let window = SaleFilter::from_raw(params.start_date, params.end_date, None)?;
    let now = Utc::now();

    let total_sales =
        SaleRepo::total_completed(&state.pool, window.start_date, window.end_date).await?;
    let monthly_sales = SaleRepo::monthly_totals(&state.pool, monthly_window_start(now)).await?;
    let daily_sales = SaleRepo::daily_totals(&state.pool, daily_window_start(now)).await?;

    Ok(Json(ApiResponse::new(SalesStats {
        total_sales,
        monthly_sales,
        daily_sales,
    })))
}

// ---------------------------------------------------------------------------
// GET /sales/{id}
// ---------------------------------------------------------------------------

pub async fn get_sale(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let sale = SaleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Sale", id))?;
    Ok(Json(ApiResponse::new(sale)))
}

// ---------------------------------------------------------------------------
// POST /sales
// ---------------------------------------------------------------------------

pub async fn create_sale(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSale>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;
    if let Some(product_id) = input.product_id {
        ensure_product_exists(&state.pool, product_id).await?;
    }

    let sale = SaleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        sale_id = sale.id,
        product_id = sale.product_id,
        status = %sale.status,
        total_amount = sale.total_amount,
        user_id = admin.user_id,
        "Sale recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(sale).with_message("Sale created successfully")),
    ))
}

// ---------------------------------------------------------------------------
// PUT /sales/{id}
// ---------------------------------------------------------------------------

pub async fn update_sale(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSale>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;
    if let Some(product_id) = input.product_id {
        ensure_product_exists(&state.pool, product_id).await?;
    }

    let updated = SaleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Sale", id))?;

    tracing::info!(
        sale_id = id,
        status = %updated.status,
        user_id = admin.user_id,
        "Sale updated",
    );

    Ok(Json(
        ApiResponse::new(updated).with_message("Sale updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /sales/{id}
// ---------------------------------------------------------------------------

pub async fn delete_sale(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SaleRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Sale", id).into());
    }

    tracing::info!(sale_id = id, user_id = admin.user_id, "Sale deleted");

    Ok(Json(
        ApiResponse::new(serde_json::json!({ "id": id }))
            .with_message("Sale deleted successfully"),
    ))
}
