//! Authorization gate: role and ownership checks composed per operation.
//!
//! Every protected operation declares an ordered list of [`Checker`]s.
//! The list is evaluated in declared order and short-circuits on the first
//! rejection, so the cheap role check always runs before any ownership
//! check that needs a storage round-trip.

pub mod ownership;
pub mod role;

pub use ownership::{TaskFact, TaskFactSource};
pub use role::RoleSet;

use axum::http::Method;
use thiserror::Error;

use taskforge_core::db::DatabaseError;

use crate::auth::claims::Payload;

/// Authorization failure classes.
#[derive(Debug, Error)]
pub enum GateError {
    /// Role check failed.
    #[error("permission denied")]
    Permission,

    /// Ownership check failed.
    #[error("resource access denied")]
    Ownership,

    /// An ownership checker was reached for a creation-style method.
    /// Points at a route wiring mistake rather than a caller error.
    #[error("ownership is not defined for resource creation")]
    CreateNotOwnable,

    /// The target resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The fact lookup itself failed.
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// A single authorization rule, one variant per rule set.
#[derive(Debug, Clone, Copy)]
pub enum Checker {
    /// Static role allow-list.
    Role(RoleSet),
    /// The caller must be the target user.
    UserOwnership { user_id: i64 },
    /// The caller must own (or be allowed to see) the target task.
    TaskOwnership { task_id: i64 },
}

impl Checker {
    async fn evaluate<F: TaskFactSource>(
        self,
        payload: &Payload,
        method: &Method,
        facts: &F,
    ) -> Result<(), GateError> {
        match self {
            Self::Role(roles) => roles.check(payload),
            Self::UserOwnership { user_id } => ownership::check_user(user_id, payload, method),
            Self::TaskOwnership { task_id } => {
                let fact = facts
                    .task_fact(task_id)
                    .await?
                    .ok_or(GateError::NotFound)?;
                ownership::check_task(fact, payload, method)
            }
        }
    }
}

/// Evaluate checkers in declared order, short-circuiting on first rejection.
pub async fn enforce<F: TaskFactSource>(
    checkers: &[Checker],
    payload: &Payload,
    method: &Method,
    facts: &F,
) -> Result<(), GateError> {
    for checker in checkers {
        checker.evaluate(payload, method, facts).await?;
    }
    Ok(())
}
