use axum::routing::{get, put};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// ```text
/// POST   /              -> create_inquiry (public)
/// GET    /              -> list_inquiries (admin)
/// GET    /{id}          -> get_inquiry (admin)
/// DELETE /{id}          -> delete_inquiry (admin)
/// PUT    /{id}/status   -> update_inquiry_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(inquiries::list_inquiries).post(inquiries::create_inquiry),
        )
        .route(
            "/{id}",
            get(inquiries::get_inquiry).delete(inquiries::delete_inquiry),
        )
        .route("/{id}/status", put(inquiries::update_inquiry_status))
}
