//! Swiss-system tournament module.
//!
//! This module provides:
//! - Player and match records
//! - Standings computed from a snapshot of both
//! - Adjacent pairing of the standings for the next round
//! - A manager that reads snapshots from the stores in [`crate::db`]
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::tournament::{compute_standings, generate_pairings, MatchRecord, Player};
//!
//! let players = vec![
//!     Player::new(1, "A"),
//!     Player::new(2, "B"),
//!     Player::new(3, "C"),
//!     Player::new(4, "D"),
//! ];
//! let matches = vec![MatchRecord::new(1, 2), MatchRecord::new(3, 4)];
//!
//! let standings = compute_standings(&players, &matches).unwrap();
//! let pairings = generate_pairings(&standings).unwrap();
//! assert_eq!(pairings[0].ids(), (1, 3));
//! assert_eq!(pairings[1].ids(), (2, 4));
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;
pub mod standings;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    MatchRecord, PairedPlayer, Pairing, Player, PlayerId, RoundSummary, StandingsEntry,
};
pub use pairing::generate_pairings;
pub use standings::compute_standings;
