pub mod auth;
pub mod tasks;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::error::{json_error_handler, query_error_handler};
use crate::repository::{TaskStore, UserDirectory};

pub use auth::AuthService;
pub use tasks::TaskService;
pub use users::UserService;

/// The three services, wrapped for registration as actix `app_data`.
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub users: web::Data<UserService>,
}

impl AppServices {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        tasks: Arc<dyn TaskStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(Arc::clone(&users), tokens)),
            tasks: web::Data::new(TaskService::new(tasks, Arc::clone(&users))),
            users: web::Data::new(UserService::new(users)),
        }
    }

    /// Registers every service as shared application data, together with the
    /// extractor configs that route body and query parse failures through `AppError`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.tasks.clone())
            .app_data(self.users.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler));
    }
}
