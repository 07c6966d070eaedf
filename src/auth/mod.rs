pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::{AuthError, AuthMiddleware};
pub use password::PasswordHasher;
pub use token::{Claims, Identity, TokenError, TokenIssuer};

/// Represents the payload for a new user registration request.
///
/// Absent fields deserialize as empty strings so that they are reported as
/// missing fields rather than as a malformed body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    /// Email address for the new account. Compared case-sensitively.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    /// Password for the new account.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// A validated registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A validated login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = AppError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        req.validate().map_err(|_| AppError::MissingFields)?;
        Ok(Self {
            name: req.name,
            email: req.email,
            password: req.password,
        })
    }
}

impl TryFrom<LoginRequest> for Credentials {
    type Error = AppError;

    fn try_from(req: LoginRequest) -> Result<Self, Self::Error> {
        req.validate().map_err(|_| AppError::MissingFields)?;
        Ok(Self {
            email: req.email,
            password: req.password,
        })
    }
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user, without password material.
    pub user: User,
    /// The bearer token for subsequent requests.
    pub token: String,
}
