//! Mounted at `/products` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET    /        -> list_products
/// POST   /        -> create_product (admin)
/// GET    /{id}    -> get_product (system or external id)
/// PUT    /{id}    -> update_product (admin)
/// DELETE /{id}    -> delete_product (admin, retires)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
