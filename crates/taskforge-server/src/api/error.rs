//! Mapping of domain errors onto HTTP responses.
//!
//! Authentication and authorization failures both reject the request, with
//! the status distinguishing unauthenticated from forbidden; bodies stay
//! generic and do not reveal which specific check failed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use taskforge_core::db::DatabaseError;

use crate::auth::jwt::TokenError;
use crate::authz::GateError;

/// Error envelope returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, expired, or invalid credentials.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated but not allowed, by role or by ownership.
    #[error("access forbidden")]
    Forbidden,

    /// An ownership checker was wired onto a creation-style route.
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("resource not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => Self::Unauthenticated,
            TokenError::Signing(e) => Self::Internal(e.into()),
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Permission | GateError::Ownership => Self::Forbidden,
            GateError::CreateNotOwnable => Self::MethodNotAllowed,
            GateError::NotFound => Self::NotFound,
            GateError::Storage(e) => Self::from(e),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(_) => Self::NotFound,
            DatabaseError::InvalidSortKey(key) => Self::BadRequest(format!("invalid sort key: {key}")),
            other => Self::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let Self::Internal(source) = &self {
            error!(error = %source, "Request failed with internal error");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
