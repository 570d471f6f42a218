//! Tournament error types.

use std::time::Duration;

use thiserror::Error;

use super::models::PlayerId;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// A match or lookup references a player that is not registered
    #[error("Player not found: {0}")]
    NotFound(PlayerId),

    /// Pairings need an even number of players
    #[error("Cannot pair an odd number of players: {0}")]
    OddPlayerCount(usize),

    /// A match report names the same player as winner and loser
    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    /// Registration name is empty
    #[error("Player name must not be empty")]
    InvalidName,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database operation did not finish in time
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),
}

impl TournamentError {
    /// Get a message that is safe to show to an operator
    ///
    /// Database errors are collapsed so connection strings and SQL
    /// details do not leak into user-facing output.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Internal storage error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
