//! Persistence contracts for users and tasks.
//!
//! Services only see the `UserDirectory` and `TaskStore` traits. Two backends
//! implement them: PostgreSQL through `sqlx`, and an in-memory one used when no
//! database is configured and throughout the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{NewUser, Task, TaskStatus, User};

pub use memory::{InMemoryTaskStore, InMemoryUserDirectory};
pub use postgres::{PgTaskStore, PgUserDirectory};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// First user whose username equals `username` or whose email equals `email`.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// Persists a new user and returns it with its assigned id.
    async fn save(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    async fn find_all(&self) -> Result<Vec<Task>, AppError>;

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, AppError>;

    async fn find_by_assignee_id(&self, assignee_id: i32) -> Result<Vec<Task>, AppError>;

    async fn find_by_status_and_assignee_id(
        &self,
        status: TaskStatus,
        assignee_id: i32,
    ) -> Result<Vec<Task>, AppError>;

    /// Inserts the task, or replaces every column of the row with the same id.
    async fn save(&self, task: &Task) -> Result<Task, AppError>;

    /// Removes the task if present. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;
}

/// Repositories selected by configuration: PostgreSQL when `database_url` is set
/// (migrations are applied first), in-memory otherwise.
pub async fn connect(
    config: &Config,
) -> Result<(Arc<dyn UserDirectory>, Arc<dyn TaskStore>), AppError> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url).await?;
            postgres::migrate(&pool).await?;
            log::info!("Using PostgreSQL storage");
            let users: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(pool.clone()));
            let tasks: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));
            Ok((users, tasks))
        }
        None => {
            log::warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
            let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
            let tasks: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
            Ok((users, tasks))
        }
    }
}
