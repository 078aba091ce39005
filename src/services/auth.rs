use std::sync::Arc;
use validator::Validate;

use crate::auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::{NewUser, Role, UserView};
use crate::repository::UserDirectory;

/// Registration and login on top of the user directory and the token service.
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserDirectory>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Creates a `USER`-role account and signs the caller in.
    ///
    /// The username check runs first, so a taken username is reported as
    /// `DuplicateUsername` even when the email is also taken.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.users.exists_by_username(&request.username).await? {
            return Err(AppError::DuplicateUsername);
        }
        if self.users.exists_by_email(&request.email).await? {
            return Err(AppError::DuplicateEmail);
        }

        let user = self
            .users
            .save(NewUser {
                username: request.username,
                email: request.email,
                password_hash: hash_password(&request.password)?,
                full_name: request.full_name,
                role: Role::User,
            })
            .await?;

        let token = self.tokens.issue(&user.username)?;
        log::info!("Registered user {} (id {})", user.username, user.id);

        Ok(AuthResponse {
            token,
            user: UserView::from(&user),
        })
    }

    /// Signs a user in by username or email.
    ///
    /// The single `username` field is matched against both columns. Unknown
    /// identifiers and wrong passwords produce the same `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_username_or_email(&request.username, &request.username)
            .await?;

        let user = match user {
            Some(user) if verify_password(&request.password, &user.password_hash)? => user,
            _ => {
                log::warn!("Failed login attempt for {}", request.username);
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user.username)?;
        log::info!("User {} logged in", user.username);

        Ok(AuthResponse {
            token,
            user: UserView::from(&user),
        })
    }
}
