//! Data models for `TaskForge` storage.

use serde::{Deserialize, Serialize};

use taskforge_core::config::DEFAULT_PAGE_LIMIT;

use crate::auth::claims::Role;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub is_completed: bool,
    pub user_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// New task contents as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial update of a task; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Paging and filtering for user listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserFilters {
    pub limit: u32,
    pub offset: u32,
    #[serde(rename = "sort-by")]
    pub sort_by: String,
    #[serde(rename = "username-contains")]
    pub username_contains: Option<String>,
    pub role: Option<Role>,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort_by: "id".to_string(),
            username_contains: None,
            role: None,
        }
    }
}

/// Paging and filtering for task listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaskFilters {
    pub limit: u32,
    pub offset: u32,
    #[serde(rename = "sort-by")]
    pub sort_by: String,
    #[serde(rename = "title-contains")]
    pub title_contains: Option<String>,
    pub completed: Option<bool>,
    pub public: Option<bool>,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort_by: "id".to_string(),
            title_contains: None,
            completed: None,
            public: None,
        }
    }
}
