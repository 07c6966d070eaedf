use std::env;
use std::fmt;

use crate::auth::password::DEFAULT_COST;

/// Signing secret used when `JWT_SECRET` is unset. Development only.
pub const DEV_JWT_SECRET: &str = "secret_for_dev";

#[derive(Debug)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = match non_empty("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                log::warn!(
                    "JWT_SECRET is not set; falling back to the insecure development secret. \
                     Set JWT_SECRET in any real deployment."
                );
                DEV_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost = parse_or("BCRYPT_COST", non_empty("BCRYPT_COST"), DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            server_host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or("PORT", non_empty("PORT"), 4000)?,
            jwt_secret,
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                non_empty("DATABASE_MAX_CONNECTIONS"),
                5,
            )?,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
