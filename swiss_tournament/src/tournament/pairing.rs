//! Next-round pairing generation.

use log::debug;

use super::errors::{TournamentError, TournamentResult};
use super::models::{PairedPlayer, Pairing, StandingsEntry};

/// Pair adjacent entries of the standings: 1st with 2nd, 3rd with 4th, and so on.
///
/// Since standings are ordered by wins, each player meets the opponent with
/// the closest record. Only the given entries are used; nothing is re-queried.
///
/// # Errors
///
/// Returns [`TournamentError::OddPlayerCount`] if `standings` has odd length.
pub fn generate_pairings(standings: &[StandingsEntry]) -> TournamentResult<Vec<Pairing>> {
    if standings.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(standings.len()));
    }

    let pairings: Vec<Pairing> = standings
        .chunks_exact(2)
        .map(|pair| Pairing {
            first: PairedPlayer::from(&pair[0]),
            second: PairedPlayer::from(&pair[1]),
        })
        .collect();

    debug!("Generated {} pairings", pairings.len());

    Ok(pairings)
}
