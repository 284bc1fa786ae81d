//! Startup provisioning of the back-office admin account.

use storefront_core::roles::{is_admin, ROLE_ADMIN};
use storefront_db::models::user::CreateUser;
use storefront_db::repositories::UserRepo;
use storefront_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// What [`ensure_admin`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvisioning {
    Created,
    Promoted,
    AlreadyAdmin,
}

/// Make sure the configured admin exists with the `admin` role.
///
/// An existing account with that email is promoted but its password is
/// left untouched.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<AdminProvisioning> {
    let email = admin.email.trim().to_lowercase();

    if let Some(user) = UserRepo::find_by_email(pool, &email).await? {
        if is_admin(&user.role) {
            return Ok(AdminProvisioning::AlreadyAdmin);
        }
        UserRepo::set_role(pool, user.id, ROLE_ADMIN).await?;
        tracing::info!(user_id = user.id, "Promoted existing user to admin");
        return Ok(AdminProvisioning::Promoted);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: admin.name.trim().to_string(),
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "Created admin user");
    Ok(AdminProvisioning::Created)
}
