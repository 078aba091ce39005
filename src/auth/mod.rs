pub mod extractors;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::task::not_blank;
use crate::models::UserView;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use policy::{authorize, is_permitted, TaskOperation};
pub use token::{Claims, TokenService};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email; both columns are matched against this one value.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Must be between 3 and 50 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(
        length(min = 1, max = 100, message = "Full name is required"),
        custom = "not_blank"
    )]
    pub full_name: String,
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT for session authentication.
    pub token: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str, full_name: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let empty_username = LoginRequest {
            username: String::new(),
            password: "password123".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = LoginRequest {
            username: "tester".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("test_user-123", "test@example.com", "password123", "Test User")
            .validate()
            .is_ok());
        // Contains space and exclamation
        assert!(register("test user!", "test@example.com", "password123", "Test User")
            .validate()
            .is_err());
        assert!(register("tu", "test@example.com", "password123", "Test User")
            .validate()
            .is_err());
        assert!(register("tester", "testexample.com", "password123", "Test User")
            .validate()
            .is_err());
        assert!(register("tester", "test@example.com", "123", "Test User")
            .validate()
            .is_err());
        assert!(register("tester", "test@example.com", "password123", "")
            .validate()
            .is_err());
        assert!(register("tester", "test@example.com", "password123", "   ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let parsed: RegisterRequest = serde_json::from_value(serde_json::json!({
            "username": "jane",
            "email": "jane@example.com",
            "password": "secret1",
            "fullName": "Jane Doe"
        }))
        .unwrap();
        assert_eq!(parsed.full_name, "Jane Doe");
    }
}
