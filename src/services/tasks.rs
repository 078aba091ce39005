use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{authorize, TaskOperation};
use crate::error::AppError;
use crate::models::{Task, TaskPriority, TaskRequest, TaskStatus, TaskView, User};
use crate::repository::{TaskStore, UserDirectory};

// Unreachable after `validate()`, which rejects a missing priority.
fn required_priority(priority: Option<TaskPriority>) -> Result<TaskPriority, AppError> {
    priority.ok_or_else(|| AppError::ValidationError("priority: Priority is required".into()))
}

/// Task CRUD with the admin-only rule on create and delete.
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserDirectory>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { tasks, users }
    }

    /// Creates a task on behalf of an admin.
    ///
    /// An `assignee_id` that does not resolve to a user is dropped without error.
    pub async fn create_task(
        &self,
        request: TaskRequest,
        acting_username: &str,
    ) -> Result<TaskView, AppError> {
        request.validate()?;
        let actor = self.authorize_actor(acting_username, TaskOperation::Create).await?;

        let mut task = Task::new(
            request.title,
            request.description,
            request.status.unwrap_or_default(),
            required_priority(request.priority)?,
            request.due_date,
        );
        if let Some(assignee_id) = request.assignee_id {
            task.assignee_id = self.resolve_user_id(assignee_id).await?;
        }
        task.creator_id = Some(actor.id);

        let saved = self.tasks.save(&task).await?;
        log::info!("Task {} created by {}", saved.id, actor.username);
        self.to_view(saved).await
    }

    /// Lists tasks, narrowed by whichever filters are present.
    pub async fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        assignee_id: Option<i32>,
    ) -> Result<Vec<TaskView>, AppError> {
        let tasks = match (status, assignee_id) {
            (Some(status), Some(assignee_id)) => {
                self.tasks
                    .find_by_status_and_assignee_id(status, assignee_id)
                    .await?
            }
            (Some(status), None) => self.tasks.find_by_status(status).await?,
            (None, Some(assignee_id)) => self.tasks.find_by_assignee_id(assignee_id).await?,
            (None, None) => self.tasks.find_all().await?,
        };

        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            views.push(self.to_view(task).await?);
        }
        Ok(views)
    }

    /// Overwrites every mutable field of the task from `request`.
    ///
    /// Returns `Ok(None)` if no task has this id. An omitted `assignee_id`
    /// clears the current assignee. No role check is applied here.
    pub async fn update_task(
        &self,
        id: Uuid,
        request: TaskRequest,
    ) -> Result<Option<TaskView>, AppError> {
        request.validate()?;

        let Some(mut task) = self.tasks.find_by_id(id).await? else {
            return Ok(None);
        };

        task.title = request.title;
        task.description = request.description;
        task.status = request.status.unwrap_or_default();
        task.priority = required_priority(request.priority)?;
        task.due_date = request.due_date;
        task.assignee_id = match request.assignee_id {
            Some(assignee_id) => self.resolve_user_id(assignee_id).await?,
            None => None,
        };
        task.updated_at = Utc::now();

        let saved = self.tasks.save(&task).await?;
        log::info!("Task {} updated", saved.id);
        self.to_view(saved).await.map(Some)
    }

    /// Deletes a task on behalf of an admin. A missing id is not an error.
    pub async fn delete_task(&self, id: Uuid, acting_username: &str) -> Result<(), AppError> {
        let actor = self.authorize_actor(acting_username, TaskOperation::Delete).await?;
        self.tasks.delete_by_id(id).await?;
        log::info!("Task {} deleted by {}", id, actor.username);
        Ok(())
    }

    pub async fn get_task_by_id(&self, id: Uuid) -> Result<Option<TaskView>, AppError> {
        match self.tasks.find_by_id(id).await? {
            Some(task) => self.to_view(task).await.map(Some),
            None => Ok(None),
        }
    }

    async fn authorize_actor(
        &self,
        acting_username: &str,
        operation: TaskOperation,
    ) -> Result<User, AppError> {
        let actor = self
            .users
            .find_by_username(acting_username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(format!("unknown user {}", acting_username)))?;

        if let Err(err) = authorize(actor.role, operation) {
            log::warn!("{} denied {:?} on tasks", actor.username, operation);
            return Err(err);
        }
        Ok(actor)
    }

    async fn resolve_user_id(&self, id: i32) -> Result<Option<i32>, AppError> {
        let user = self.users.find_by_id(id).await?;
        if user.is_none() {
            log::debug!("Assignee {} does not exist; leaving task unassigned", id);
        }
        Ok(user.map(|u| u.id))
    }

    async fn display_name(&self, id: Option<i32>) -> Result<Option<String>, AppError> {
        match id {
            Some(id) => Ok(self.users.find_by_id(id).await?.map(|u| u.full_name)),
            None => Ok(None),
        }
    }

    async fn to_view(&self, task: Task) -> Result<TaskView, AppError> {
        let assignee_name = self.display_name(task.assignee_id).await?;
        let creator_name = self.display_name(task.creator_id).await?;
        Ok(TaskView {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            assignee_id: task.assignee_id,
            assignee_name,
            creator_id: task.creator_id,
            creator_name,
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }
}
