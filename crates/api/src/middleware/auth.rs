//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::roles::is_admin;
use storefront_core::types::DbId;
use storefront_db::models::user::UserResponse;
use storefront_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer` header.
///
/// The token only names the user; name, email and role are loaded from the
/// database, so a deleted user is rejected even with an unexpired token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        is_admin(&self.role)
    }

    /// Public view of the user, as returned by `/auth/me`.
    pub fn profile(&self) -> UserResponse {
        UserResponse {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the raw token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

async fn resolve_user(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    Ok(AuthUser {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| unauthorized("Not authorized, no token"))?;
        resolve_user(token, state).await
    }
}

/// Optional authentication for public endpoints that reveal more to admins.
///
/// A missing, malformed or stale token yields `MaybeAuthUser(None)` rather
/// than a rejection.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(AuthUser::is_admin)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Some(token)) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };
        match resolve_user(token, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(AppError::Core(CoreError::Unauthorized(reason))) => {
                tracing::debug!(%reason, "Ignoring unusable token on public route");
                Ok(MaybeAuthUser(None))
            }
            Err(other) => Err(other),
        }
    }
}
