//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user behind a Bearer token.
//! - [`auth::MaybeAuthUser`] -- the same, but anonymous requests pass through.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
