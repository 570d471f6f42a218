//! Database configuration module.
//!
//! Provides configuration structures for database connection management.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading database settings from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatabaseConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `DB_MAX_CONNECTIONS`: Maximum pool size (default: 5)
    /// - `DB_MIN_CONNECTIONS`: Minimum pool size (default: 1)
    /// - `DB_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 10)
    /// - `DB_IDLE_TIMEOUT`: Idle timeout in seconds (default: 600)
    /// - `DB_MAX_LIFETIME`: Max lifetime in seconds (default: 1800)
    ///
    /// # Errors
    ///
    /// Fails if `DATABASE_URL` is not set or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, DatabaseConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| DatabaseConfigError::Missing("DATABASE_URL".to_string()))?;
        Self::from_env_with_url(database_url)
    }

    /// Like [`DatabaseConfig::from_env`], but with the URL supplied by the caller
    pub fn from_env_with_url(database_url: String) -> Result<Self, DatabaseConfigError> {
        Ok(Self {
            database_url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", 5)?,
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", 1)?,
            connection_timeout_secs: parse_env_or("DB_CONNECTION_TIMEOUT", 10)?,
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT", 600)?,
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME", 1800)?,
        })
    }

    /// Create a default configuration for development
    ///
    /// Uses `postgres://postgres@localhost/tournament` as the database URL
    pub fn development() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/tournament".to_string(),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}

fn parse_env_or<T: FromStr>(key: &str, default: T) -> Result<T, DatabaseConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| DatabaseConfigError::Invalid {
            var: key.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
