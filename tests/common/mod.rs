#![allow(dead_code)]

use chrono::Duration;
use std::sync::Arc;
use taskdesk::auth::{hash_password, TokenService};
use taskdesk::models::{NewUser, Role, User};
use taskdesk::repository::{InMemoryTaskStore, InMemoryUserDirectory, TaskStore, UserDirectory};
use taskdesk::AppServices;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_PASSWORD: &str = "admin@1234";
pub const MEMBER_PASSWORD: &str = "member@1234";

/// In-memory stores with one admin and one regular user already present.
pub struct TestContext {
    pub users: Arc<InMemoryUserDirectory>,
    pub tasks: Arc<InMemoryTaskStore>,
    pub tokens: Arc<TokenService>,
    pub services: AppServices,
    pub admin: User,
    pub member: User,
}

impl TestContext {
    pub async fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let tasks = Arc::new(InMemoryTaskStore::new());
        let tokens = Arc::new(TokenService::new(TEST_SECRET, Duration::hours(24)));

        let admin = users
            .save(new_user("admin", "admin@example.com", ADMIN_PASSWORD, "Admin User", Role::Admin))
            .await
            .expect("failed to create admin");
        let member = users
            .save(new_user("member", "member@example.com", MEMBER_PASSWORD, "Mia Member", Role::User))
            .await
            .expect("failed to create member");

        let directory: Arc<dyn UserDirectory> = users.clone();
        let store: Arc<dyn TaskStore> = tasks.clone();
        let services = AppServices::new(directory, store, Arc::clone(&tokens));

        Self {
            users,
            tasks,
            tokens,
            services,
            admin,
            member,
        }
    }

    /// `Authorization` header carrying a fresh token for `username`.
    pub fn bearer(&self, username: &str) -> (&'static str, String) {
        let token = self.tokens.issue(username).expect("failed to issue token");
        ("Authorization", format!("Bearer {}", token))
    }
}

fn new_user(username: &str, email: &str, password: &str, full_name: &str, role: Role) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).expect("failed to hash password"),
        full_name: full_name.to_string(),
        role,
    }
}

/// Builds the same `App` as `main.rs` on top of a `TestContext`.
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        let tokens = std::sync::Arc::clone(&$ctx.tokens);
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| services.configure(cfg))
                .wrap(actix_web::middleware::Logger::default())
                .service(taskdesk::routes::health::health)
                .service(
                    actix_web::web::scope("/api")
                        .wrap(taskdesk::auth::AuthMiddleware::new(tokens))
                        .configure(taskdesk::routes::config),
                ),
        )
        .await
    }};
}
