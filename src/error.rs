//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Services signal failures through distinct variants; only the `ResponseError`
//! implementation below decides which HTTP status a variant becomes.
//!
//! `AppError` also provides `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error` and `bcrypt::BcryptError`,
//! allowing for easy conversion using the `?` operator.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::{ValidationErrors, ValidationErrorsKind};

const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing request fields (HTTP 400).
    /// Carries the per-field messages joined as `field: message; ...`.
    ValidationError(String),
    /// The requested username is already taken (HTTP 400).
    DuplicateUsername,
    /// The requested email is already registered (HTTP 400).
    DuplicateEmail,
    /// Unknown identifier or wrong password (HTTP 401).
    /// Both cases share this variant so callers cannot tell them apart.
    InvalidCredentials,
    /// A bearer token failed signature or expiry checks (HTTP 401).
    InvalidToken(String),
    /// A protected route was called without a bearer token (HTTP 401).
    MissingToken,
    /// The acting user may not perform the operation (HTTP 403).
    Unauthorized(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// Wraps errors from the `sqlx` crate (HTTP 500).
    DatabaseError(String),
    /// Missing or malformed startup configuration (HTTP 500 if it ever reaches a handler).
    Configuration(String),
    /// Any other unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateUsername => write!(f, "Username already exists"),
            AppError::DuplicateEmail => write!(f, "Email already exists"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AppError::MissingToken => write!(f, "Missing token"),
            AppError::Unauthorized(msg) => write!(f, "Access denied: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Server-side failures are logged here and answered with a generic message so no
/// internal detail leaks to the client.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::DuplicateUsername
            | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken(_) | AppError::MissingToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::Configuration(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::InvalidToken(_) => "Invalid token".to_string(),
            AppError::Unauthorized(_) => "Access denied".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(_)
            | AppError::Configuration(_)
            | AppError::InternalServerError(_) => {
                log::error!("{}", self);
                GENERIC_ERROR.to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Flattens `validator::ValidationErrors` into `field: message` pairs.
///
/// Fields are sorted so the message is stable across runs.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut parts: Vec<String> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(field_errors) => field_errors
                    .iter()
                    .map(|e| {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        format!("{}: {}", field, message)
                    })
                    .collect::<Vec<_>>(),
                _ => vec![format!("{}: invalid", field)],
            })
            .collect();
        parts.sort();
        AppError::ValidationError(parts.join("; "))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// `JsonConfig` error handler: malformed or incomplete bodies become `ValidationError`.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = match &error {
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    AppError::ValidationError(format!("body: {}", detail)).into()
}

/// `QueryConfig` error handler, same contract as `json_error_handler`.
pub fn query_error_handler(error: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = match &error {
        QueryPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    AppError::ValidationError(format!("query: {}", detail)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_error_responses() {
        let cases = vec![
            (AppError::ValidationError("title: required".into()), 400),
            (AppError::DuplicateUsername, 400),
            (AppError::DuplicateEmail, 400),
            (AppError::InvalidCredentials, 401),
            (AppError::InvalidToken("ExpiredSignature".into()), 401),
            (AppError::MissingToken, 401),
            (AppError::Unauthorized("not an admin".into()), 403),
            (AppError::NotFound("Task not found".into()), 404),
            (AppError::DatabaseError("connection reset".into()), 500),
            (AppError::InternalServerError("boom".into()), 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.error_response().status(), status, "{:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_internal_errors_do_not_leak_detail() {
        let response = AppError::DatabaseError("password authentication failed".into())
            .error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], GENERIC_ERROR);
    }

    #[actix_web::test]
    async fn test_payload_errors_become_validation_errors() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let parse_error = serde_json::from_str::<Sample>("{}").unwrap_err();

        let response = json_error_handler(JsonPayloadError::Deserialize(parse_error), &req)
            .error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "body: missing field `title` at line 1 column 2");
    }

    #[derive(Debug, Validate, serde::Deserialize)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(max = 3, message = "Too long"))]
        code: String,
    }

    #[test]
    fn test_validation_errors_are_flattened_per_field() {
        let sample = Sample {
            title: String::new(),
            code: "abcd".into(),
        };
        match AppError::from(sample.validate().unwrap_err()) {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "code: Too long; title: Title is required")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
