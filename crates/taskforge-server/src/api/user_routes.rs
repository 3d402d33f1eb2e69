//! User endpoints.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::Method;
use serde::Serialize;

use crate::auth::claims::{Payload, Role};
use crate::authz::{Checker, RoleSet, enforce};
use crate::storage::{User, UserFilters};

use super::{ApiError, AppState};

const ADMIN_ONLY: RoleSet = RoleSet::allow(&[]);
const USERS: RoleSet = RoleSet::allow(&[Role::User]);

/// Public projection of a user record.
#[derive(Debug, Serialize)]
pub struct UserRead {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteUserReturn {
    pub message: &'static str,
    pub user: UserRead,
}

/// The caller's own record; guests get a synthetic stand-in.
pub async fn me(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
) -> Result<Json<UserRead>, ApiError> {
    if payload.user_id == 0 {
        return Ok(Json(UserRead {
            id: 0,
            username: "guest".to_string(),
            role: payload.user_role,
        }));
    }

    let user = state.db.get_user(payload.user_id).await?;
    Ok(Json(user.into()))
}

pub async fn all_users(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Query(filters): Query<UserFilters>,
) -> Result<Json<Vec<UserRead>>, ApiError> {
    enforce(&[Checker::Role(ADMIN_ONLY)], &payload, &method, &state.db).await?;

    let users = state.db.list_users(&filters).await?;
    Ok(Json(users.into_iter().map(UserRead::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRead>, ApiError> {
    enforce(
        &[Checker::Role(USERS), Checker::UserOwnership { user_id }],
        &payload,
        &method,
        &state.db,
    )
    .await?;

    let user = state.db.get_user(user_id).await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Path(user_id): Path<i64>,
) -> Result<Json<DeleteUserReturn>, ApiError> {
    enforce(
        &[Checker::Role(USERS), Checker::UserOwnership { user_id }],
        &payload,
        &method,
        &state.db,
    )
    .await?;

    let user = state.db.delete_user(user_id).await?;
    Ok(Json(DeleteUserReturn {
        message: "User has been removed successfully.",
        user: user.into(),
    }))
}
