use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskStatus, User};
use crate::repository::{TaskStore, UserDirectory};

/// Process-local user directory. Users are kept in insertion order and get
/// sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.email == email))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        // Mirrors the UNIQUE constraints of the SQL schema.
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let stored = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }
}

/// Process-local task store. Listing returns tasks in insertion order; replacing a
/// task keeps its position.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool + Send,
    {
        let tasks = self.tasks.read().await;
        tasks.iter().filter(|t| predicate(t)).cloned().collect()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, AppError> {
        Ok(self.filtered(|t| t.status == status).await)
    }

    async fn find_by_assignee_id(&self, assignee_id: i32) -> Result<Vec<Task>, AppError> {
        Ok(self
            .filtered(|t| t.assignee_id == Some(assignee_id))
            .await)
    }

    async fn find_by_status_and_assignee_id(
        &self,
        status: TaskStatus,
        assignee_id: i32,
    ) -> Result<Vec<Task>, AppError> {
        Ok(self
            .filtered(|t| t.status == status && t.assignee_id == Some(assignee_id))
            .await)
    }

    async fn save(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => tasks.push(task.clone()),
        }
        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.tasks.write().await.retain(|t| t.id != id);
        Ok(())
    }
}
