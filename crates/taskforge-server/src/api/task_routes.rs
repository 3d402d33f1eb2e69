//! Task endpoints.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{Method, StatusCode};
use serde::Serialize;

use crate::auth::claims::{Payload, Role};
use crate::authz::{Checker, RoleSet, enforce};
use crate::storage::{Task, TaskFilters, TaskInput, TaskUpdate};

use super::{ApiError, AppState};

const USERS: RoleSet = RoleSet::allow(&[Role::User]);

/// Public projection of a task record.
#[derive(Debug, Serialize)]
pub struct TaskRead {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub is_completed: bool,
    pub user_id: i64,
}

impl From<Task> for TaskRead {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_public: task.is_public,
            is_completed: task.is_completed,
            user_id: task.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateTaskReturn {
    pub message: &'static str,
    pub task: TaskRead,
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskReturn {
    pub message: &'static str,
    pub task: TaskRead,
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Json(input): Json<TaskInput>,
) -> Result<(StatusCode, Json<TaskRead>), ApiError> {
    enforce(&[Checker::Role(USERS)], &payload, &method, &state.db).await?;

    let task = state.db.create_task(&input, payload.user_id).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn all_tasks(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Query(filters): Query<TaskFilters>,
) -> Result<Json<Vec<TaskRead>>, ApiError> {
    enforce(&[Checker::Role(USERS)], &payload, &method, &state.db).await?;

    let tasks = state.db.list_tasks(payload.user_id, &filters).await?;
    Ok(Json(tasks.into_iter().map(TaskRead::from).collect()))
}

/// Read a single task. Deliberately carries no role check: the ownership
/// rule alone decides, which lets guests read public tasks.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskRead>, ApiError> {
    enforce(
        &[Checker::TaskOwnership { task_id }],
        &payload,
        &method,
        &state.db,
    )
    .await?;

    let task = state.db.get_task(task_id).await?;
    Ok(Json(task.into()))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Path(task_id): Path<i64>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<UpdateTaskReturn>, ApiError> {
    enforce(
        &[Checker::Role(USERS), Checker::TaskOwnership { task_id }],
        &payload,
        &method,
        &state.db,
    )
    .await?;

    let task = state.db.update_task(task_id, &update).await?;
    Ok(Json(UpdateTaskReturn {
        message: "Task has been updated successfully.",
        task: task.into(),
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(payload): Extension<Payload>,
    method: Method,
    Path(task_id): Path<i64>,
) -> Result<Json<DeleteTaskReturn>, ApiError> {
    enforce(
        &[Checker::Role(USERS), Checker::TaskOwnership { task_id }],
        &payload,
        &method,
        &state.db,
    )
    .await?;

    let task = state.db.delete_task(task_id).await?;
    Ok(Json(DeleteTaskReturn {
        message: "Task has been removed successfully.",
        task: task.into(),
    }))
}
