use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A registered user as exposed through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A user row together with its password hash.
///
/// Only the credential store and the login path ever see this type.
#[derive(Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_hash() {
        let creds = UserCredentials {
            id: 1,
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
        };

        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("$2b$10$"));
        assert!(rendered.contains("a@x.com"));
    }

    #[test]
    fn test_user_serialization_has_no_hash() {
        let user = UserCredentials {
            id: 1,
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "secret-hash".to_string(),
        }
        .into_user();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Ana", "email": "a@x.com"}));
    }
}
