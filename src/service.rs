//!
//! # Task Lifecycle Engine
//!
//! `TaskService` implements every operation of the API on top of a [`Store`]:
//! registration and login (password hashing plus token issuance), and the task
//! operations, which all run on behalf of an already authenticated [`Identity`].
//!
//! The service holds no mutable state. The signing secret lives inside its
//! [`TokenIssuer`], fixed at construction.

use std::sync::Arc;

use crate::auth::{AuthResponse, Credentials, Identity, PasswordHasher, Registration, TokenIssuer};
use crate::error::AppError;
use crate::models::{NewTask, StatusChange, Task};
use crate::store::Store;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        Self {
            store,
            tokens,
            hasher,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Creates an account and signs the new user in.
    pub async fn register(&self, registration: Registration) -> Result<AuthResponse, AppError> {
        if self
            .store
            .find_user_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::EmailTaken);
        }

        let hasher = self.hasher;
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

        let user = self
            .store
            .insert_user(&registration.name, &registration.email, &password_hash)
            .await?;
        let token = self.tokens.issue(&user)?;

        log::info!("Registered user {}", user.id);
        Ok(AuthResponse { user, token })
    }

    /// Verifies credentials and issues a fresh token.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AppError> {
        let record = self
            .store
            .find_user_by_email(&credentials.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = self.hasher;
        let password = credentials.password;
        let stored_hash = record.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        let user = record.into_user();
        let token = self.tokens.issue(&user)?;
        Ok(AuthResponse { user, token })
    }

    pub async fn create_task(&self, identity: &Identity, task: NewTask) -> Result<Task, AppError> {
        let task = self.store.insert_task(identity.id, &task).await?;
        log::debug!("User {} created task {}", identity.id, task.id);
        Ok(task)
    }

    /// Lists the caller's tasks, newest first. Any other user id is forbidden.
    pub async fn list_tasks(
        &self,
        identity: &Identity,
        requested_user_id: i32,
    ) -> Result<Vec<Task>, AppError> {
        if requested_user_id != identity.id {
            return Err(AppError::Forbidden);
        }
        self.store.tasks_for_user(requested_user_id).await
    }

    /// Moves a task to its next status, or to an explicit one.
    pub async fn advance_status(
        &self,
        identity: &Identity,
        task_id: i32,
        change: &StatusChange,
    ) -> Result<Task, AppError> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(AppError::TaskNotFound)?;

        if task.user_id != identity.id {
            return Err(AppError::Forbidden);
        }

        let next = change.apply(task.status)?;
        let updated = self
            .store
            .set_task_status(task_id, next)
            .await?
            .ok_or(AppError::TaskNotFound)?;

        log::debug!(
            "Task {} moved {} -> {}",
            task_id,
            task.status,
            updated.status
        );
        Ok(updated)
    }
}
