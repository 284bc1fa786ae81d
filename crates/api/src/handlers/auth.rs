//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_USER;
use storefront_core::validation::validate_input;
use storefront_db::models::user::{CreateUser, LoginRequest, RegisterRequest, User, UserResponse};
use storefront_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Payload returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn issue(state: &AppState, user: &User) -> AppResult<AuthPayload> {
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthPayload {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(user),
    })
}

/// POST /api/auth/register
///
/// Create a `user`-role account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("User already exists".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(issue(&state, &user)?)),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    validate_input(&input)?;

    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        verify_against_dummy(&input.password);
        tracing::info!("Login rejected: unknown email");
        return Err(CoreError::InvalidCredentials.into());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(ApiResponse::new(issue(&state, &user)?)))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(ApiResponse::new(auth.profile())))
}
