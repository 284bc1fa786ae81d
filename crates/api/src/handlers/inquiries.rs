//! Handlers for customer inquiries.
//!
//! Submitting is public; everything else requires an admin.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::product::{as_system_id, Visibility};
use storefront_core::submission::{validate_transition, InquiryStatus, SubmissionStatus};
use storefront_core::types::DbId;
use storefront_core::validation::validate_input;
use storefront_db::models::inquiry::CreateInquiry;
use storefront_db::models::{SubmissionListParams, UpdateStatus};
use storefront_db::repositories::{InquiryRepo, ProductRepo};
use storefront_db::DbPool;

use super::parse_status_filter;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Resolve an inquiry's product reference: external business id first,
/// then system id. Retired products still resolve.
async fn resolve_product_reference(pool: &DbPool, raw: &str) -> Result<Option<DbId>, sqlx::Error> {
    if let Some(product) = ProductRepo::find_by_external_id(pool, raw, Visibility::Any).await? {
        return Ok(Some(product.id));
    }
    match as_system_id(raw) {
        Some(id) => Ok(ProductRepo::find_by_id(pool, id, Visibility::Any)
            .await?
            .map(|p| p.id)),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// POST /inquiries
// ---------------------------------------------------------------------------

/// Submit an inquiry. An unresolvable `productId` does not fail the
/// request: the inquiry is stored without a product and the response
/// carries a warning.
pub async fn create_inquiry(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInquiry>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let mut warning = None;
    let product_id = match input.product_id.as_deref() {
        Some(raw) => {
            let resolved = resolve_product_reference(&state.pool, raw).await?;
            if resolved.is_none() {
                tracing::warn!(product_ref = %raw, "Inquiry product reference did not resolve");
                warning = Some(format!(
                    "Product '{raw}' was not found; the inquiry was saved without a product"
                ));
            }
            resolved
        }
        None => None,
    };

    let inquiry = InquiryRepo::create(&state.pool, &input, product_id).await?;

    tracing::info!(
        inquiry_id = inquiry.id,
        product_id = ?inquiry.product_id,
        "Inquiry submitted",
    );

    let mut body = ApiResponse::new(inquiry).with_message("Inquiry submitted successfully");
    if let Some(w) = warning {
        body = body.with_warning(w);
    }
    Ok((StatusCode::CREATED, Json(body)))
}

// ---------------------------------------------------------------------------
// GET /inquiries
// ---------------------------------------------------------------------------

pub async fn list_inquiries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter::<InquiryStatus>(params.status)?;
    let inquiries = InquiryRepo::list(&state.pool, status).await?;
    Ok(Json(ApiResponse::list(inquiries)))
}

// ---------------------------------------------------------------------------
// GET /inquiries/{id}
// ---------------------------------------------------------------------------

pub async fn get_inquiry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let inquiry = InquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(InquiryStatus::ENTITY, id))?;
    Ok(Json(ApiResponse::new(inquiry)))
}

// ---------------------------------------------------------------------------
// PUT /inquiries/{id}/status
// ---------------------------------------------------------------------------

pub async fn update_inquiry_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatus>,
) -> AppResult<impl IntoResponse> {
    let next = InquiryStatus::parse(input.status.trim())?;

    let current = InquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(InquiryStatus::ENTITY, id))?;
    validate_transition(current.status, next)?;

    let updated = InquiryRepo::update_status(&state.pool, id, next)
        .await?
        .ok_or_else(|| CoreError::not_found(InquiryStatus::ENTITY, id))?;

    tracing::info!(
        inquiry_id = id,
        from = %current.status,
        to = %next,
        user_id = admin.user_id,
        "Inquiry status updated",
    );

    Ok(Json(
        ApiResponse::new(updated).with_message("Inquiry status updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /inquiries/{id}
// ---------------------------------------------------------------------------

pub async fn delete_inquiry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !InquiryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(InquiryStatus::ENTITY, id).into());
    }

    tracing::info!(inquiry_id = id, user_id = admin.user_id, "Inquiry deleted");

    Ok(Json(
        ApiResponse::new(serde_json::json!({ "id": id }))
            .with_message("Inquiry deleted successfully"),
    ))
}
