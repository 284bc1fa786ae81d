//! Handlers for wholesale, sponsorship, distribution and partnership
//! enquiries.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::submission::{validate_transition, BusinessEnquiryStatus, SubmissionStatus};
use storefront_core::types::DbId;
use storefront_core::validation::validate_input;
use storefront_db::models::business_enquiry::CreateBusinessEnquiry;
use storefront_db::models::{SubmissionListParams, UpdateStatus};
use storefront_db::repositories::BusinessEnquiryRepo;

use super::parse_status_filter;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /business-enquiries
// ---------------------------------------------------------------------------

pub async fn create_business_enquiry(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBusinessEnquiry>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let enquiry = BusinessEnquiryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        business_enquiry_id = enquiry.id,
        enquiry_type = %enquiry.enquiry_type,
        "Business enquiry submitted",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(enquiry).with_message("Enquiry submitted successfully")),
    ))
}

// ---------------------------------------------------------------------------
// GET /business-enquiries[/{id}]
// ---------------------------------------------------------------------------

pub async fn list_business_enquiries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter::<BusinessEnquiryStatus>(params.status)?;
    let enquiries = BusinessEnquiryRepo::list(&state.pool, status).await?;
    Ok(Json(ApiResponse::list(enquiries)))
}

pub async fn get_business_enquiry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let enquiry = BusinessEnquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(BusinessEnquiryStatus::ENTITY, id))?;
    Ok(Json(ApiResponse::new(enquiry)))
}

// ---------------------------------------------------------------------------
// PUT /business-enquiries/{id}/status
// ---------------------------------------------------------------------------

pub async fn update_business_enquiry_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatus>,
) -> AppResult<impl IntoResponse> {
    let next = BusinessEnquiryStatus::parse(input.status.trim())?;

    let current = BusinessEnquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(BusinessEnquiryStatus::ENTITY, id))?;
    validate_transition(current.status, next)?;

    let updated = BusinessEnquiryRepo::update_status(&state.pool, id, next)
        .await?
        .ok_or_else(|| CoreError::not_found(BusinessEnquiryStatus::ENTITY, id))?;

    tracing::info!(
        business_enquiry_id = id,
        from = %current.status,
        to = %next,
        user_id = admin.user_id,
        "Business enquiry status updated",
    );

    Ok(Json(
        ApiResponse::new(updated).with_message("Enquiry status updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /business-enquiries/{id}
// ---------------------------------------------------------------------------

pub async fn delete_business_enquiry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !BusinessEnquiryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(BusinessEnquiryStatus::ENTITY, id).into());
    }

    tracing::info!(
        business_enquiry_id = id,
        user_id = admin.user_id,
        "Business enquiry deleted",
    );

    Ok(Json(
        ApiResponse::new(serde_json::json!({ "id": id }))
            .with_message("Enquiry deleted successfully"),
    ))
}
