//! # Credential Store
//!
//! Persistence for users and tasks behind the [`Store`] trait. Two backends exist:
//! [`PgStore`] for PostgreSQL and [`MemoryStore`], a process-local store used when no
//! database is configured and throughout the test suite.
//!
//! Every operation is a single statement (or a single critical section for the
//! in-memory backend). Concurrent status updates on the same task resolve as
//! last-writer-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskStatus, User, UserCredentials};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and the health report.
    fn backend(&self) -> &'static str;

    /// Looks a user up by exact (case-sensitive) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    /// Persists a new user. Fails with `AppError::EmailTaken` if the email exists.
    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;

    /// Persists a new `pending` task owned by `user_id`.
    async fn insert_task(&self, user_id: i32, task: &NewTask) -> Result<Task, AppError>;

    /// All tasks owned by `user_id`, newest first.
    async fn tasks_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, task_id: i32) -> Result<Option<Task>, AppError>;

    /// Overwrites a task's status, returning the updated row if it exists.
    async fn set_task_status(
        &self,
        task_id: i32,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
