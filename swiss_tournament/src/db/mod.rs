//! Database module providing PostgreSQL connection pooling and the
//! player/match stores the tournament manager reads from.

use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::tournament::TournamentResult;

pub mod config;
pub mod repository;
pub mod timeouts;

pub use config::{DatabaseConfig, DatabaseConfigError};
pub use repository::{
    InMemoryRepository, MatchRepository, PgMatchRepository, PgPlayerRepository,
    PgSnapshotRepository, PlayerRepository, SnapshotRepository, TournamentSnapshot,
};

/// Statements creating the tournament schema, in dependency order
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS players (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS matches (
        id BIGSERIAL PRIMARY KEY,
        winner BIGINT NOT NULL REFERENCES players (id) ON DELETE CASCADE,
        loser BIGINT NOT NULL REFERENCES players (id) ON DELETE CASCADE,
        CHECK (winner <> loser)
    )",
];

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use swiss_tournament::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let db = Database::new(&DatabaseConfig::development()).await?;
    ///     db.close().await;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `players` and `matches` tables if they do not exist
    pub async fn init_schema(&self) -> TournamentResult<()> {
        for statement in SCHEMA {
            timeouts::with_long_timeout(sqlx::query(statement).execute(&self.pool)).await?;
        }
        info!("Tournament schema ready");
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> TournamentResult<()> {
        timeouts::with_default_timeout(sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
