//! CLI configuration management.
//!
//! Combines command line overrides with environment variables and validates
//! the result before any connection is attempted.

use log::debug;
use swiss_tournament::db::{DatabaseConfig, DatabaseConfigError};

/// Complete CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Print results as JSON instead of tables
    pub json: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// `database_url_override` comes from `--db-url` and wins over
    /// `DATABASE_URL`; without either the development database is used.
    pub fn from_env(database_url_override: Option<String>, json: bool) -> Result<Self, ConfigError> {
        let database = match database_url_override {
            Some(url) => DatabaseConfig::from_env_with_url(url)?,
            None => match DatabaseConfig::from_env() {
                Err(DatabaseConfigError::Missing(var)) => {
                    let fallback = DatabaseConfig::development().database_url;
                    debug!("{} not set, using {}", var, fallback);
                    DatabaseConfig::from_env_with_url(fallback)?
                }
                other => other?,
            },
        };

        Ok(CliConfig { database, json })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.database.database_url;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL".to_string(),
                reason: "Must be a postgres:// or postgresql:// URL".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error(transparent)]
    Database(#[from] DatabaseConfigError),
}
