use crate::{
    auth::{LoginRequest, RegisterRequest},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a `USER`-role account and returns a token with the public user view.
///
/// ## Responses:
/// - `201 Created`: `{ token, user }`.
/// - `400 Bad Request`: validation failure, duplicate username or duplicate email.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let response = service.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Accepts either the username or the email in the `username` field.
///
/// ## Responses:
/// - `200 OK`: `{ token, user }`.
/// - `401 Unauthorized`: unknown user or wrong password (indistinguishable).
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = service.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
