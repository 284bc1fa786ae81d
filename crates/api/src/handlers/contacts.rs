//! Handlers for contact-form messages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::submission::{validate_transition, ContactStatus, SubmissionStatus};
use storefront_core::types::DbId;
use storefront_core::validation::validate_input;
use storefront_db::models::contact::CreateContact;
use storefront_db::models::{SubmissionListParams, UpdateStatus};
use storefront_db::repositories::ContactRepo;

use super::parse_status_filter;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /contacts (public). Always stored as `pending`.
pub async fn create_contact(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateContact>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let contact = ContactRepo::create(&state.pool, &input).await?;

    tracing::info!(contact_id = contact.id, "Contact message submitted");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(contact).with_message("Message sent successfully")),
    ))
}

pub async fn list_contacts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter::<ContactStatus>(params.status)?;
    let contacts = ContactRepo::list(&state.pool, status).await?;
    Ok(Json(ApiResponse::list(contacts)))
}

pub async fn get_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(ContactStatus::ENTITY, id))?;
    Ok(Json(ApiResponse::new(contact)))
}

/// PUT /contacts/{id}/status
pub async fn update_contact_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatus>,
) -> AppResult<impl IntoResponse> {
    let next = ContactStatus::parse(input.status.trim())?;

    let current = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found(ContactStatus::ENTITY, id))?;
    validate_transition(current.status, next)?;

    let updated = ContactRepo::update_status(&state.pool, id, next)
        .await?
        .ok_or_else(|| CoreError::not_found(ContactStatus::ENTITY, id))?;

    tracing::info!(
        contact_id = id,
        from = %current.status,
        to = %next,
        user_id = admin.user_id,
        "Contact status updated",
    );

    Ok(Json(
        ApiResponse::new(updated).with_message("Contact status updated successfully"),
    ))
}

pub async fn delete_contact(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ContactStatus::ENTITY, id).into());
    }

    tracing::info!(contact_id = id, user_id = admin.user_id, "Contact deleted");

    Ok(Json(
        ApiResponse::new(serde_json::json!({ "id": id }))
            .with_message("Contact deleted successfully"),
    ))
}
