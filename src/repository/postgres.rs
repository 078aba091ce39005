use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskStatus, User};
use crate::repository::{TaskStore, UserDirectory};

const USER_COLUMNS: &str = "id, username, email, password_hash, full_name, role, created_at";
const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, assignee_id, \
                            creator_id, created_at, updated_at";

/// Applies the embedded `migrations/` directory.
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

const UNIQUE_VIOLATION: &str = "23505";

/// Maps a UNIQUE violation on `users` to the matching duplicate kind.
///
/// Concurrent registrations can both pass the `exists_by_*` checks; the loser lands here.
fn insert_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &error {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            if let Some(duplicate) = duplicate_for_constraint(db.constraint()) {
                return duplicate;
            }
        }
    }
    error.into()
}

fn duplicate_for_constraint(constraint: Option<&str>) -> Option<AppError> {
    match constraint {
        Some("users_username_key") => Some(AppError::DuplicateUsername),
        Some("users_email_key") => Some(AppError::DuplicateEmail),
        _ => None,
    }
}

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE username = $1 OR email = $2 ORDER BY id LIMIT 1",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, full_name, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.full_name)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(insert_error)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks ORDER BY created_at", TASK_COLUMNS);
        Ok(sqlx::query_as::<_, Task>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE status = $1 ORDER BY created_at",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_assignee_id(&self, assignee_id: i32) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE assignee_id = $1 ORDER BY created_at",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(assignee_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_status_and_assignee_id(
        &self,
        status: TaskStatus,
        assignee_id: i32,
    ) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE status = $1 AND assignee_id = $2 ORDER BY created_at",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(status)
            .bind(assignee_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save(&self, task: &Task) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks ({cols}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 description = EXCLUDED.description, \
                 status = EXCLUDED.status, \
                 priority = EXCLUDED.priority, \
                 due_date = EXCLUDED.due_date, \
                 assignee_id = EXCLUDED.assignee_id, \
                 creator_id = EXCLUDED.creator_id, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {cols}",
            cols = TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.priority)
            .bind(task.due_date)
            .bind(task.assignee_id)
            .bind(task.creator_id)
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
