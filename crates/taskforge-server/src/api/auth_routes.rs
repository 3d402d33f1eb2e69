//! Login and registration endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::claims::Role;
use crate::auth::password;

use super::middleware::token_cookies;
use super::user_routes::UserRead;
use super::{ApiError, AppState};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginReturn {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RegisterReturn {
    pub message: &'static str,
    pub user: UserRead,
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<LoginReturn>), ApiError> {
    let user = state
        .db
        .get_user_by_username(&credentials.username)
        .await
        .map_err(|_| ApiError::Unauthenticated)?;

    let valid = password::verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password verification failed: {e}")))?;

    if !valid {
        warn!(username = %credentials.username, "Failed login attempt");
        return Err(ApiError::Unauthenticated);
    }

    let pair = state.sessions.issue_pair(user.id, user.role)?;
    info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((
        token_cookies(&pair, state.sessions.codec()),
        Json(LoginReturn {
            message: "Login successful.",
        }),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, CookieJar, Json<RegisterReturn>), ApiError> {
    if credentials.username.len() < MIN_USERNAME_LEN {
        return Err(ApiError::Unprocessable(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if credentials.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Unprocessable(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if state
        .db
        .get_user_by_username(&credentials.username)
        .await
        .is_ok()
    {
        return Err(ApiError::Conflict("username already taken".to_string()));
    }

    let hash = password::hash_password(&credentials.password)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

    let user = state
        .db
        .create_user(&credentials.username, &hash, Role::User)
        .await?;

    let pair = state.sessions.issue_pair(user.id, user.role)?;
    info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        token_cookies(&pair, state.sessions.codec()),
        Json(RegisterReturn {
            message: "User has been registered successfully.",
            user: user.into(),
        }),
    ))
}
