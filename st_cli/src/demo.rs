//! Offline tournament simulation over the in-memory store.

use log::info;
use rand::Rng;
use serde::Serialize;
use swiss_tournament::{RoundSummary, StandingsEntry, TournamentManager, TournamentResult};

const DEMO_NAMES: &[&str] = &[
    "Twilight Sparkle",
    "Fluttershy",
    "Applejack",
    "Pinkie Pie",
    "Rarity",
    "Rainbow Dash",
    "Princess Celestia",
    "Princess Luna",
    "Bruno Walton",
    "Boots O'Neal",
    "Cathy Burton",
    "Diane Grant",
    "Markov Chaney",
    "Joe Malik",
    "Mao Tsu-hsi",
    "Atlanta Hope",
];

/// Everything that happened in a simulated tournament
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Standings and pairings at the start of each round
    pub rounds: Vec<RoundSummary>,
    /// Standings after the last round
    pub final_standings: Vec<StandingsEntry>,
}

fn demo_name(index: usize) -> String {
    DEMO_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Player {}", index + 1))
}

/// Register `players` players and play `rounds` rounds with random winners.
///
/// Fails with `OddPlayerCount` if the field cannot be paired.
pub async fn run_demo<R: Rng>(
    players: usize,
    rounds: usize,
    rng: &mut R,
) -> TournamentResult<DemoReport> {
    let mgr = TournamentManager::in_memory();
    for index in 0..players {
        mgr.register_player(&demo_name(index)).await?;
    }

    let mut played = Vec::with_capacity(rounds);
    for round in 1..=rounds {
        let summary = mgr.next_round().await?;
        for pairing in &summary.pairings {
            let (first, second) = pairing.ids();
            let (winner, loser) = if rng.random_bool(0.5) {
                (first, second)
            } else {
                (second, first)
            };
            mgr.report_match(winner, loser).await?;
        }
        info!("Round {} complete: {} matches", round, summary.pairings.len());
        played.push(summary);
    }

    Ok(DemoReport {
        rounds: played,
        final_standings: mgr.player_standings().await?,
    })
}
