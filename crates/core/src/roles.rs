//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether the given role name grants back-office access.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
