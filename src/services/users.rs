use std::sync::Arc;

use crate::error::AppError;
use crate::models::UserView;
use crate::repository::UserDirectory;

/// Read-only access to the user directory.
pub struct UserService {
    users: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn list_users(&self) -> Result<Vec<UserView>, AppError> {
        let users = self.users.find_all().await?;
        Ok(users.iter().map(UserView::from).collect())
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<UserView>, AppError> {
        Ok(self.users.find_by_id(id).await?.as_ref().map(UserView::from))
    }
}
