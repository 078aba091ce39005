use crate::{error::AppError, services::UserService};
use actix_web::{get, web, HttpResponse, Responder};

/// Lists every user as a public view.
#[get("")]
pub async fn get_users(service: web::Data<UserService>) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(service.list_users().await?))
}

#[get("/{id}")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    match service.get_user_by_id(user_id.into_inner()).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
