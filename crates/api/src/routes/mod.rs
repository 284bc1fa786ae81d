pub mod auth;
pub mod business_enquiries;
pub mod contacts;
pub mod health;
pub mod inquiries;
pub mod products;
pub mod sales;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/me                              current user (token)
///
/// /products                             list (public), create (admin)
/// /products/{id}                        get (public), update, retire (admin)
///
/// /inquiries                            submit (public), list (admin)
/// /inquiries/{id}                       get, delete (admin)
/// /inquiries/{id}/status                update status (admin)
/// /contacts[/{id}[/status]]             same shape as inquiries
/// /business-enquiries[/{id}[/status]]   same shape as inquiries
///
/// /sales                                list, create (admin)
/// /sales/stats                          aggregates (admin)
/// /sales/{id}                           get, update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/inquiries", inquiries::router())
        .nest("/contacts", contacts::router())
        .nest("/business-enquiries", business_enquiries::router())
        .nest("/sales", sales::router())
}
