//! Domain types and rules for the storefront back office.
//!
//! This crate has no database or HTTP dependencies so the same status
//! enums, filters and validation helpers can be shared by the repository
//! layer, the API server and the typed client.

pub mod error;
pub mod product;
pub mod roles;
pub mod sale;
pub mod submission;
pub mod types;
pub mod validation;
