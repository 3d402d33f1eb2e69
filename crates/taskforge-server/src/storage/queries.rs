//! Database queries for the `TaskForge` server.

use taskforge_core::config::MAX_PAGE_LIMIT;
use taskforge_core::db::{DatabaseError, unix_timestamp};

use crate::auth::claims::Role;
use crate::authz::{TaskFact, TaskFactSource};

use super::db::Database;
use super::models::{Task, TaskFilters, TaskInput, TaskUpdate, User, UserFilters};

const USER_SORT_KEYS: &[&str] = &["id", "username", "role", "created_at", "updated_at"];
const TASK_SORT_KEYS: &[&str] = &[
    "id",
    "title",
    "is_public",
    "is_completed",
    "created_at",
    "updated_at",
];

/// Translate a `sort-by` value (optionally `-`-prefixed for descending)
/// into an `ORDER BY` fragment, rejecting keys outside the whitelist.
fn order_clause(sort_by: &str, allowed: &[&str]) -> Result<String, DatabaseError> {
    let (column, direction) = match sort_by.strip_prefix('-') {
        Some(rest) => (rest, "DESC"),
        None => (sort_by, "ASC"),
    };

    if !allowed.contains(&column) {
        return Err(DatabaseError::InvalidSortKey(column.to_string()));
    }

    Ok(format!("{column} {direction}"))
}

const fn clamp_limit(limit: u32) -> u32 {
    if limit > MAX_PAGE_LIMIT { MAX_PAGE_LIMIT } else { limit }
}

impl Database {
    // =========================================================================
    // User queries
    // =========================================================================

    /// Create a new user.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_user(result.last_insert_rowid()).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))
    }

    /// Get a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User with username {username}")))
    }

    /// List users matching the given filters.
    pub async fn list_users(&self, filters: &UserFilters) -> Result<Vec<User>, DatabaseError> {
        let order = order_clause(&filters.sort_by, USER_SORT_KEYS)?;

        let mut sql = String::from("SELECT * FROM users WHERE 1 = 1");
        if filters.username_contains.is_some() {
            sql.push_str(" AND username LIKE ?");
        }
        if filters.role.is_some() {
            sql.push_str(" AND role = ?");
        }
        sql.push_str(&format!(" ORDER BY {order} LIMIT ? OFFSET ?"));

        let mut query = sqlx::query_as::<_, User>(&sql);
        if let Some(pattern) = &filters.username_contains {
            query = query.bind(format!("%{pattern}%"));
        }
        if let Some(role) = filters.role {
            query = query.bind(role);
        }
        query = query
            .bind(i64::from(clamp_limit(filters.limit)))
            .bind(i64::from(filters.offset));

        Ok(query.fetch_all(self.pool()).await?)
    }

    /// Delete a user by ID, returning the removed row.
    ///
    /// The user's tasks go with it (foreign key cascade).
    pub async fn delete_user(&self, id: i64) -> Result<User, DatabaseError> {
        let user = self.get_user(id).await?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(user)
    }

    // =========================================================================
    // Task queries
    // =========================================================================

    /// Create a new task owned by `user_id`.
    pub async fn create_task(&self, input: &TaskInput, user_id: i64) -> Result<Task, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO tasks (title, description, is_public, is_completed, user_id, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.is_public)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_task(result.last_insert_rowid()).await
    }

    /// Get a task by ID.
    pub async fn get_task(&self, id: i64) -> Result<Task, DatabaseError> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Task {id}")))
    }

    /// List tasks owned by `owner_id`, matching the given filters.
    pub async fn list_tasks(
        &self,
        owner_id: i64,
        filters: &TaskFilters,
    ) -> Result<Vec<Task>, DatabaseError> {
        let order = order_clause(&filters.sort_by, TASK_SORT_KEYS)?;

        let mut sql = String::from("SELECT * FROM tasks WHERE user_id = ?");
        if filters.title_contains.is_some() {
            sql.push_str(" AND title LIKE ?");
        }
        if filters.completed.is_some() {
            sql.push_str(" AND is_completed = ?");
        }
        if filters.public.is_some() {
            sql.push_str(" AND is_public = ?");
        }
        sql.push_str(&format!(" ORDER BY {order} LIMIT ? OFFSET ?"));

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(owner_id);
        if let Some(pattern) = &filters.title_contains {
            query = query.bind(format!("%{pattern}%"));
        }
        if let Some(completed) = filters.completed {
            query = query.bind(completed);
        }
        if let Some(public) = filters.public {
            query = query.bind(public);
        }
        query = query
            .bind(i64::from(clamp_limit(filters.limit)))
            .bind(i64::from(filters.offset));

        Ok(query.fetch_all(self.pool()).await?)
    }

    /// Apply a partial update to a task, returning the updated row.
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, DatabaseError> {
        let task = self.get_task(id).await?;
        let now = unix_timestamp();

        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, is_public = ?, is_completed = ?, updated_at = ? WHERE id = ?",
        )
        .bind(update.title.as_ref().unwrap_or(&task.title))
        .bind(update.description.as_ref().unwrap_or(&task.description))
        .bind(update.is_public.unwrap_or(task.is_public))
        .bind(update.is_completed.unwrap_or(task.is_completed))
        .bind(now)
        .bind(id)
        .execute(self.pool())
        .await?;

        self.get_task(id).await
    }

    /// Delete a task by ID, returning the removed row.
    pub async fn delete_task(&self, id: i64) -> Result<Task, DatabaseError> {
        let task = self.get_task(id).await?;

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(task)
    }
}

impl TaskFactSource for Database {
    /// Fetch the minimal `{owner_id, is_public}` projection for an
    /// ownership decision.
    async fn task_fact(&self, task_id: i64) -> Result<Option<TaskFact>, DatabaseError> {
        let fact = sqlx::query_as::<_, TaskFact>(
            "SELECT user_id AS owner_id, is_public FROM tasks WHERE id = ?",
        )
        .bind(task_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(fact)
    }
}
