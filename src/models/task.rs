use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Rejects strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Body of both the create and the update request.
///
/// Updates are full replacements, so every field here overwrites the stored task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[validate(
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"),
        custom = "not_blank"
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"),
        custom = "not_blank"
    )]
    pub description: String,

    /// Defaults to `TODO` when absent.
    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    #[validate(required(message = "Priority is required"))]
    pub priority: Option<TaskPriority>,

    #[serde(default)]
    pub assignee_id: Option<i32>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A task as stored by the task store.
///
/// `assignee_id` and `creator_id` are weak references: they are looked up when a
/// view is rendered and nothing is cascaded when the referenced user goes away.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<i32>,
    pub creator_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` with a fresh id and both timestamps set to now.
    /// References are left unset; the caller resolves them against the directory.
    pub fn new(
        title: String,
        description: String,
        status: TaskStatus,
        priority: TaskPriority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            status,
            priority,
            due_date,
            assignee_id: None,
            creator_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Query parameters accepted by `GET /api/tasks`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Assignee user id.
    pub assignee: Option<i32>,
}

/// Read-only projection of a task with the referenced users' names filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<i32>,
    pub assignee_name: Option<String>,
    pub creator_id: Option<i32>,
    pub creator_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
