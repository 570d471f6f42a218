//! Database query timeout helpers
//!
//! Wraps store queries so a stalled connection surfaces as an error instead
//! of hanging the caller.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::tournament::{TournamentError, TournamentResult};

/// Default timeout for database queries (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for schema setup and bulk deletes (30 seconds)
pub const LONG_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute a query with timeout
///
/// # Example
///
/// ```no_run
/// use swiss_tournament::db::timeouts::{with_timeout, DEFAULT_QUERY_TIMEOUT};
/// # use sqlx::PgPool;
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
///
/// with_timeout(
///     DEFAULT_QUERY_TIMEOUT,
///     sqlx::query("SELECT COUNT(*) FROM players").fetch_one(pool),
/// )
/// .await?;
///
/// # Ok(())
/// # }
/// ```
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(duration, future).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(TournamentError::Database(e)),
        Err(_) => Err(TournamentError::Timeout(duration)),
    }
}

/// Execute a query with the default timeout
pub async fn with_default_timeout<F, T>(future: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(DEFAULT_QUERY_TIMEOUT, future).await
}

/// Execute a long-running statement with the extended timeout
pub async fn with_long_timeout<F, T>(future: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(LONG_OPERATION_TIMEOUT, future).await
}
