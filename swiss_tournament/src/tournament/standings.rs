//! Standings calculation from a snapshot of players and matches.

use std::collections::HashMap;

use log::{debug, warn};

use super::errors::{TournamentError, TournamentResult};
use super::models::{MatchRecord, Player, PlayerId, StandingsEntry};

/// Rank players by number of wins.
///
/// Every player appears exactly once, including players who have not played
/// yet. Ties keep the order of `players`, so callers should pass players in
/// registration order.
///
/// # Errors
///
/// Returns [`TournamentError::NotFound`] if a match names a player that is
/// not in `players`.
pub fn compute_standings(
    players: &[Player],
    matches: &[MatchRecord],
) -> TournamentResult<Vec<StandingsEntry>> {
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(position, player)| (player.id, position))
        .collect();

    let mut standings: Vec<StandingsEntry> = players
        .iter()
        .map(|player| StandingsEntry {
            id: player.id,
            name: player.name.clone(),
            wins: 0,
            matches: 0,
        })
        .collect();

    let lookup = |id: PlayerId| {
        index.get(&id).copied().ok_or_else(|| {
            warn!("Match references unknown player {id}");
            TournamentError::NotFound(id)
        })
    };

    for record in matches {
        let winner = lookup(record.winner)?;
        let loser = lookup(record.loser)?;

        standings[winner].wins += 1;
        standings[winner].matches += 1;
        standings[loser].matches += 1;
    }

    // sort_by is stable; equal win counts stay in player order
    standings.sort_by(|a, b| b.wins.cmp(&a.wins));

    debug!(
        "Computed standings for {} players over {} matches",
        standings.len(),
        matches.len()
    );

    Ok(standings)
}
