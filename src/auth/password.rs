use crate::error::AppError;

/// Work factor used when `BCRYPT_COST` is not configured.
pub const DEFAULT_COST: u32 = 10;

/// Salted, adaptive one-way password hashing (bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes `password` with a fresh salt.
    ///
    /// A failure here aborts the registration attempt as an internal error.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(AppError::from)
    }

    /// Checks `password` against a stored hash.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        match bcrypt::verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}
