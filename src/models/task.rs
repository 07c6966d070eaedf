use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started. Every task starts here.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    /// The state an implicit advance moves to, or `None` from the terminal state.
    pub fn next(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Done),
            TaskStatus::Done => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(AppError::InvalidStatus)
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    /// Identifier of the owning user. Never changes after creation.
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /tasks`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

impl TryFrom<CreateTaskRequest> for NewTask {
    type Error = AppError;

    fn try_from(req: CreateTaskRequest) -> Result<Self, Self::Error> {
        req.validate().map_err(|_| AppError::MissingTitle)?;
        Ok(Self {
            title: req.title,
            description: req.description.filter(|d| !d.is_empty()),
        })
    }
}

/// Payload for `PUT /tasks/{id}/status`. The whole body is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}

/// The requested status transition.
///
/// An explicit status that names no known state is carried as-is and only
/// rejected by [`StatusChange::apply`], once the task has been found and its
/// owner checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Move to the next state in `pending -> in_progress -> done`.
    Advance,
    /// Set exactly this status, whatever the current one is.
    Set(TaskStatus),
    /// An explicit status that is not one of the known states.
    Unrecognised(String),
}

impl From<StatusUpdateRequest> for StatusChange {
    fn from(req: StatusUpdateRequest) -> Self {
        match req.status {
            None => StatusChange::Advance,
            Some(raw) if raw.is_empty() => StatusChange::Advance,
            Some(raw) => match raw.parse() {
                Ok(status) => StatusChange::Set(status),
                Err(_) => StatusChange::Unrecognised(raw),
            },
        }
    }
}

impl StatusChange {
    /// Resolves the status a task in `current` ends up in.
    pub fn apply(&self, current: TaskStatus) -> Result<TaskStatus, AppError> {
        match self {
            StatusChange::Advance => current.next().ok_or(AppError::AlreadyDone),
            StatusChange::Set(target) => Ok(*target),
            StatusChange::Unrecognised(_) => Err(AppError::InvalidStatus),
        }
    }
}
