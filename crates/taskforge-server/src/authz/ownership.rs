//! Ownership verification against the caller's identity.
//!
//! Two rule sets share one shape: user records may only be touched by the
//! user themselves, tasks additionally honour a public-visibility flag on
//! reads. Both reject creation-style methods outright, since ownership of
//! a resource that does not exist yet is a wiring mistake.

use std::future::Future;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use taskforge_core::db::DatabaseError;

use crate::auth::claims::Payload;

use super::GateError;

/// Minimal ownership-relevant projection of a task.
///
/// Fetched per check and discarded with the decision; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskFact {
    pub owner_id: i64,
    pub is_public: bool,
}

/// Read-only source of task facts: the one bridge the authorization gate
/// has into persistence.
pub trait TaskFactSource: Send + Sync {
    /// Fetch the fact for `task_id`, or `None` if the task does not exist.
    fn task_fact(
        &self,
        task_id: i64,
    ) -> impl Future<Output = Result<Option<TaskFact>, DatabaseError>> + Send;
}

/// Ownership rule for user records.
pub(super) fn check_user(
    target_user_id: i64,
    payload: &Payload,
    method: &Method,
) -> Result<(), GateError> {
    if *method == Method::POST {
        return Err(GateError::CreateNotOwnable);
    }

    let permitted = payload.user_role.is_admin() || target_user_id == payload.user_id;
    if reads_or_writes(method) && permitted {
        return Ok(());
    }

    Err(GateError::Ownership)
}

/// Ownership rule for tasks: reads honour the public flag, writes do not.
pub(super) fn check_task(
    fact: TaskFact,
    payload: &Payload,
    method: &Method,
) -> Result<(), GateError> {
    if *method == Method::POST {
        return Err(GateError::CreateNotOwnable);
    }

    let is_admin = payload.user_role.is_admin();
    let is_owner = fact.owner_id == payload.user_id;

    if *method == Method::GET && (is_admin || is_owner || fact.is_public) {
        return Ok(());
    }

    if (*method == Method::PUT || *method == Method::DELETE) && (is_admin || is_owner) {
        return Ok(());
    }

    Err(GateError::Ownership)
}

fn reads_or_writes(method: &Method) -> bool {
    *method == Method::GET || *method == Method::PUT || *method == Method::DELETE
}
