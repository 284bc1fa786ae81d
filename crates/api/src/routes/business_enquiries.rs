use axum::routing::{get, put};
use axum::Router;

use crate::handlers::business_enquiries;
use crate::state::AppState;

/// ```text
/// POST   /              -> create_business_enquiry (public)
/// GET    /              -> list_business_enquiries (admin)
/// GET    /{id}          -> get_business_enquiry (admin)
/// DELETE /{id}          -> delete_business_enquiry (admin)
/// PUT    /{id}/status   -> update_business_enquiry_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(business_enquiries::list_business_enquiries)
                .post(business_enquiries::create_business_enquiry),
        )
        .route(
            "/{id}",
            get(business_enquiries::get_business_enquiry)
                .delete(business_enquiries::delete_business_enquiry),
        )
        .route("/{id}/status", put(business_enquiries::update_business_enquiry_status))
}
