//! Typed HTTP client for the storefront back-office API.
//!
//! [`ApiClient`] wraps every endpoint, decoding the `{ success, data }`
//! envelope and turning `{ success: false }` bodies into
//! [`ClientError::Api`]. The signed-in admin is held in an explicit
//! [`Session`] owned by the client. [`dashboard::load`] folds the list and
//! stats endpoints into the figures the admin dashboard shows.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use session::Session;
