//! # Swiss Tournament
//!
//! Standings and pairings for a Swiss-system tournament, where each round
//! pairs players with the opponent whose win record is closest to their own.
//!
//! Data flows one way: match records → standings → pairings. The two
//! computations are pure functions over snapshots; storage is supplied by the
//! caller through the repository traits in [`db`].
//!
//! ## Core Modules
//!
//! - [`tournament`]: Records, standings, pairings and the tournament manager
//! - [`db`]: PostgreSQL pool, schema and the player/match stores
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::TournamentManager;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), swiss_tournament::TournamentError> {
//! let mgr = TournamentManager::in_memory();
//! let a = mgr.register_player("Twilight Sparkle").await?;
//! let b = mgr.register_player("Fluttershy").await?;
//! mgr.report_match(a, b).await?;
//!
//! let pairings = mgr.swiss_pairings().await?;
//! assert_eq!(pairings[0].ids(), (a, b));
//! # Ok(())
//! # }
//! ```

/// PostgreSQL access and store implementations.
pub mod db;

/// Standings, pairings and tournament management.
pub mod tournament;
pub use tournament::{
    MatchRecord, PairedPlayer, Pairing, Player, PlayerId, RoundSummary, StandingsEntry,
    TournamentError, TournamentManager, TournamentResult, compute_standings, generate_pairings,
};
