use storefront_core::roles::is_admin;

use crate::types::User;

/// A signed-in user and the bearer token that proves it.
///
/// Created by [`ApiClient::login`](crate::ApiClient::login) or
/// [`ApiClient::restore`](crate::ApiClient::restore) and dropped by
/// [`ApiClient::logout`](crate::ApiClient::logout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    pub fn is_admin(&self) -> bool {
        is_admin(&self.user.role)
    }
}
