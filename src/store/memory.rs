use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskStatus, User, UserCredentials};
use crate::store::Store;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserCredentials>,
    tasks: Vec<Task>,
}

/// A store that keeps everything in process memory.
///
/// Ids are assigned sequentially from 1, per table. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailTaken);
        }

        let record = UserCredentials {
            id: tables.users.len() as i32 + 1,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(record.clone());
        Ok(record.into_user())
    }

    async fn insert_task(&self, user_id: i32, task: &NewTask) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        let task = Task {
            id: tables.tasks.len() as i32 + 1,
            user_id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn tasks_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn find_task(&self, task_id: i32) -> Result<Option<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().find(|t| t.id == task_id).cloned())
    }

    async fn set_task_status(
        &self,
        task_id: i32,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .map(|task| {
                task.status = status;
                task.clone()
            }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
