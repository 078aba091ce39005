use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a user. Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

/// A user record as stored by the user directory.
///
/// Not serializable on purpose: the password hash must only leave the process
/// through `UserView`, which omits it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been persisted yet; the directory assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_omits_password_hash() {
        let user = User {
            id: 7,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            full_name: "Jane Doe".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserView::from(&user)).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["role"], "ADMIN");
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
