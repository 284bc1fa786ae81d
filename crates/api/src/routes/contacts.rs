use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// ```text
/// POST   /              -> create_contact (public)
/// GET    /              -> list_contacts (admin)
/// GET    /{id}          -> get_contact (admin)
/// DELETE /{id}          -> delete_contact (admin)
/// PUT    /{id}/status   -> update_contact_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/{id}",
            get(contacts::get_contact).delete(contacts::delete_contact),
        )
        .route("/{id}/status", put(contacts::update_contact_status))
}
