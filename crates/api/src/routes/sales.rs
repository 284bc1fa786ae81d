//! Mounted at `/sales` by `api_routes()`. Every route requires an admin.

use axum::routing::get;
use axum::Router;

use crate::handlers::sales;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_sales
/// POST   /          -> create_sale
/// GET    /stats     -> sales_stats
/// GET    /{id}      -> get_sale
/// PUT    /{id}      -> update_sale
/// DELETE /{id}      -> delete_sale
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::list_sales).post(sales::create_sale))
        .route("/stats", get(sales::sales_stats))
        .route(
            "/{id}",
            get(sales::get_sale)
                .put(sales::update_sale)
                .delete(sales::delete_sale),
        )
}
