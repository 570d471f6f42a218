//! Tournament data models for Swiss-system play.

use serde::{Deserialize, Serialize};

/// Player ID type
pub type PlayerId = i64;

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID assigned at registration
    pub id: PlayerId,
    /// Display name (need not be unique)
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a single reported match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Player who won
    pub winner: PlayerId,
    /// Player who lost
    pub loser: PlayerId,
}

impl MatchRecord {
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self { winner, loser }
    }

    /// Whether the given player took part in this match
    pub fn involves(&self, player: PlayerId) -> bool {
        self.winner == player || self.loser == player
    }
}

/// A player's row in the standings table.
///
/// Derived from the player and match sets on every query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    /// Player ID
    pub id: PlayerId,
    /// Player name
    pub name: String,
    /// Number of matches won
    pub wins: u32,
    /// Number of matches played (wins + losses)
    pub matches: u32,
}

impl StandingsEntry {
    /// Number of matches lost, zero for an entry with more wins than matches
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }
}

/// One side of a pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedPlayer {
    pub id: PlayerId,
    pub name: String,
}

impl From<&StandingsEntry> for PairedPlayer {
    fn from(entry: &StandingsEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
        }
    }
}

/// Two players drawn against each other for the next round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: PairedPlayer,
    pub second: PairedPlayer,
}

impl Pairing {
    /// IDs of both players
    pub fn ids(&self) -> (PlayerId, PlayerId) {
        (self.first.id, self.second.id)
    }

    /// Flat `(id1, name1, id2, name2)` row
    pub fn as_tuple(&self) -> (PlayerId, &str, PlayerId, &str) {
        (
            self.first.id,
            &self.first.name,
            self.second.id,
            &self.second.name,
        )
    }
}

/// Standings and the pairings drawn from them, taken from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub standings: Vec<StandingsEntry>,
    pub pairings: Vec<Pairing>,
}
