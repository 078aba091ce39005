use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskFilter, TaskRequest},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

/// Retrieves tasks, optionally filtered.
///
/// ## Query Parameters:
/// - `status` (optional): `TODO`, `IN_PROGRESS` or `DONE`.
/// - `assignee` (optional): id of the assigned user.
///
/// ## Responses:
/// - `200 OK`: JSON array of task views, unpaginated.
/// - `400 Bad Request`: unparseable query parameters.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    service: web::Data<TaskService>,
    filter: web::Query<TaskFilter>,
) -> Result<impl Responder, AppError> {
    let filter = filter.into_inner();
    let tasks = service.list_tasks(filter.status, filter.assignee).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task. Admin only.
///
/// ## Responses:
/// - `201 Created`: the new task view.
/// - `400 Bad Request`: validation failure.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: the caller is not an admin.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    task_data: web::Json<TaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service
        .create_task(task_data.into_inner(), user.username())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    match service.get_task_by_id(task_id.into_inner()).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Replaces every mutable field of a task.
///
/// Any authenticated user may update. Omitting `assigneeId` unassigns the task.
///
/// ## Responses:
/// - `200 OK`: the updated task view.
/// - `400 Bad Request`: validation failure.
/// - `404 Not Found`: no task with this id.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskRequest>,
) -> Result<impl Responder, AppError> {
    match service
        .update_task(task_id.into_inner(), task_data.into_inner())
        .await?
    {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by its ID. Admin only.
///
/// ## Responses:
/// - `204 No Content`: deleted, or there was nothing to delete.
/// - `403 Forbidden`: the caller is not an admin.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    service
        .delete_task(task_id.into_inner(), user.username())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
