use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskStatus, User, UserCredentials};
use crate::store::Store;

const TASK_COLUMNS: &str = "id, user_id, title, description, status, created_at";

/// PostgreSQL-backed store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool that opens connections on first use.
    ///
    /// An unreachable database therefore does not stop the server from starting;
    /// requests that need it fail individually.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        // A unique violation on email converts to AppError::EmailTaken.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
             RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_task(&self, user_id: i32, task: &NewTask) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (user_id, title, description, status) VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(TaskStatus::Pending)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn tasks_for_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task(&self, task_id: i32) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn set_task_status(
        &self,
        task_id: i32,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks SET status = $1 WHERE id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(status)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
