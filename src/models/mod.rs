pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, NewTask, StatusChange, StatusUpdateRequest, Task, TaskStatus};
pub use user::{User, UserCredentials};
