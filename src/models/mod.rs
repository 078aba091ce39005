pub mod task;
pub mod user;

pub use task::{Task, TaskFilter, TaskPriority, TaskRequest, TaskStatus, TaskView};
pub use user::{NewUser, Role, User, UserView};
