use crate::error::AppError;
use crate::models::Role;

/// Operations on tasks that are subject to the role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    Create,
    Read,
    Update,
    Delete,
}

/// Whether `role` may perform `operation`.
///
/// Creating and deleting tasks is reserved to admins. Updating is open to every
/// authenticated user.
pub fn is_permitted(role: Role, operation: TaskOperation) -> bool {
    match (role, operation) {
        (Role::Admin, _) => true,
        (Role::User, TaskOperation::Read | TaskOperation::Update) => true,
        (Role::User, TaskOperation::Create | TaskOperation::Delete) => false,
    }
}

pub fn authorize(role: Role, operation: TaskOperation) -> Result<(), AppError> {
    if is_permitted(role, operation) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "role {:?} may not {:?} tasks",
            role, operation
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_table() {
        let expectations = [
            (Role::Admin, TaskOperation::Create, true),
            (Role::Admin, TaskOperation::Read, true),
            (Role::Admin, TaskOperation::Update, true),
            (Role::Admin, TaskOperation::Delete, true),
            (Role::User, TaskOperation::Create, false),
            (Role::User, TaskOperation::Read, true),
            (Role::User, TaskOperation::Update, true),
            (Role::User, TaskOperation::Delete, false),
        ];

        for (role, operation, allowed) in expectations {
            assert_eq!(
                is_permitted(role, operation),
                allowed,
                "{:?} / {:?}",
                role,
                operation
            );
        }
    }

    #[test]
    fn test_authorize_reports_unauthorized() {
        assert!(authorize(Role::Admin, TaskOperation::Delete).is_ok());
        assert!(matches!(
            authorize(Role::User, TaskOperation::Delete),
            Err(AppError::Unauthorized(_))
        ));
    }
}
