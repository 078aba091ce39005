//! Startup bootstrap: one admin, one regular user and a handful of sample tasks.
//!
//! Runs only against an empty user directory, so restarting the server against a
//! populated database is a no-op.

use chrono::{Duration, Utc};

use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::{NewUser, Role, Task, TaskPriority, TaskStatus, User};
use crate::repository::{TaskStore, UserDirectory};

struct SampleTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    due_in_days: i64,
    for_admin: bool,
}

const SAMPLE_TASKS: [SampleTask; 7] = [
    SampleTask {
        title: "Setup project",
        description: "Initialize the backend and the frontend",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        due_in_days: 3,
        for_admin: true,
    },
    SampleTask {
        title: "Design DB schema",
        description: "Plan out database entities",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        due_in_days: -2,
        for_admin: true,
    },
    SampleTask {
        title: "Implement Auth",
        description: "JWT login/signup",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        due_in_days: 5,
        for_admin: false,
    },
    SampleTask {
        title: "Create dashboard",
        description: "Frontend UI work",
        status: TaskStatus::Done,
        priority: TaskPriority::Low,
        due_in_days: -7,
        for_admin: false,
    },
    SampleTask {
        title: "Write unit tests",
        description: "For handlers and services",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        due_in_days: 1,
        for_admin: true,
    },
    SampleTask {
        title: "Configure CI/CD",
        description: "GitHub Actions setup",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        due_in_days: 9,
        for_admin: true,
    },
    SampleTask {
        title: "Add user profile page",
        description: "Component for user details",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        due_in_days: -4,
        for_admin: false,
    },
];

/// Seeds the stores if the user directory is empty.
///
/// Returns `true` when data was written.
pub async fn seed_if_empty(
    users: &dyn UserDirectory,
    tasks: &dyn TaskStore,
) -> Result<bool, AppError> {
    if !users.find_all().await?.is_empty() {
        log::debug!("User directory is not empty; skipping seed data");
        return Ok(false);
    }

    let admin = users
        .save(seed_user("admin", "admin@example.com", "admin@1234", "Admin User", Role::Admin)?)
        .await?;
    let user = users
        .save(seed_user("user", "user@example.com", "user@1234", "Regular User", Role::User)?)
        .await?;

    let today = Utc::now().date_naive();
    for sample in SAMPLE_TASKS.iter() {
        let assignee: &User = if sample.for_admin { &admin } else { &user };
        let mut task = Task::new(
            sample.title.to_string(),
            sample.description.to_string(),
            sample.status,
            sample.priority,
            Some(today + Duration::days(sample.due_in_days)),
        );
        task.assignee_id = Some(assignee.id);
        tasks.save(&task).await?;
    }

    log::info!(
        "Seeded users {} and {} with {} sample tasks",
        admin.username,
        user.username,
        SAMPLE_TASKS.len()
    );
    Ok(true)
}

fn seed_user(
    username: &str,
    email: &str,
    password: &str,
    full_name: &str,
    role: Role,
) -> Result<NewUser, AppError> {
    Ok(NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: hash_password(password)?,
        full_name: full_name.to_string(),
        role,
    })
}
