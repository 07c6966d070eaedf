//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure an operation can report is a variant here, from a missing request field
//! to a store outage. Each variant belongs to one [`ErrorCategory`], and the category alone
//! decides the HTTP status the client sees.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application errors
//! into JSON responses of the form `{ "error": "<message>" }`. Internal failures are logged
//! with their full detail and rendered with a generic message so nothing leaks to clients.
//! `From` implementations for `sqlx::Error`, `bcrypt::BcryptError`, and the authentication
//! error types let callers propagate with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

use crate::auth::{AuthError, TokenError};

/// Message returned to clients for every internal failure.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// The coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed input (HTTP 400).
    Validation,
    /// Absent, malformed, invalid, or expired credential (HTTP 401).
    Auth,
    /// Acting on another user's resource (HTTP 403).
    Ownership,
    /// Referenced resource absent (HTTP 404).
    NotFound,
    /// Duplicate unique value (HTTP 400).
    Conflict,
    /// Store or hashing failure (HTTP 500).
    Internal,
}

impl ErrorCategory {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCategory::Validation | ErrorCategory::Conflict => StatusCode::BAD_REQUEST,
            ErrorCategory::Auth => StatusCode::UNAUTHORIZED,
            ErrorCategory::Ownership => StatusCode::FORBIDDEN,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration or login without every required field.
    MissingFields,
    /// Task creation without a title.
    MissingTitle,
    /// An explicit status outside `pending`, `in_progress`, `done`.
    InvalidStatus,
    /// Implicit advance requested on a task that is already `done`.
    AlreadyDone,
    /// Request body could not be interpreted at all.
    ValidationError(String),
    /// Registration with an email that already belongs to a user.
    EmailTaken,
    /// Unknown email or wrong password. The two cases are deliberately indistinguishable.
    InvalidCredentials,
    /// The request carried no usable credential.
    Unauthorized(AuthError),
    /// The caller does not own the resource.
    Forbidden,
    /// The referenced task does not exist.
    TaskNotFound,
    /// An unexpected server-side failure (hashing, token signing, worker pool).
    InternalServerError(String),
    /// A failure reported by the credential store.
    DatabaseError(String),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::MissingFields
            | AppError::MissingTitle
            | AppError::InvalidStatus
            | AppError::AlreadyDone
            | AppError::ValidationError(_)
            | AppError::InvalidCredentials => ErrorCategory::Validation,
            AppError::EmailTaken => ErrorCategory::Conflict,
            AppError::Unauthorized(_) => ErrorCategory::Auth,
            AppError::Forbidden => ErrorCategory::Ownership,
            AppError::TaskNotFound => ErrorCategory::NotFound,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// The message shown to API clients.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingFields => "Missing required fields".into(),
            AppError::MissingTitle => "Title is required".into(),
            AppError::InvalidStatus => "Invalid status".into(),
            AppError::AlreadyDone => "Task is already done".into(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::EmailTaken => "Email already registered".into(),
            AppError::InvalidCredentials => "Invalid credentials".into(),
            AppError::Unauthorized(err) => err.client_message().into(),
            AppError::Forbidden => "Access denied".into(),
            AppError::TaskNotFound => "Task not found".into(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                GENERIC_INTERNAL_MESSAGE.into()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(err) => write!(f, "Unauthorized: {}", err),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            other => write!(f, "{}", other.client_message()),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Internal errors are logged here, once, with their full detail.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.category().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self.category() {
            ErrorCategory::Internal => log::error!("{}", self),
            _ => log::debug!("Request rejected: {}", self),
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError::DatabaseError`.
///
/// A unique-constraint violation can only come from the users' email index,
/// so it maps to `AppError::EmailTaken`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_unique_violation() {
                return AppError::EmailTaken;
            }
        }
        AppError::DatabaseError(error.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        AppError::Unauthorized(error)
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(AuthError::Token(error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}
