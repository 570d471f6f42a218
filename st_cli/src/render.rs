//! Text and JSON rendering of tournament results.

use serde::Serialize;
use swiss_tournament::{Pairing, StandingsEntry};

/// Standings as a fixed-width table
pub fn standings_table(standings: &[StandingsEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>6}  {:<30} {:>4} {:>4} {:>7}\n",
        "Rank", "ID", "Name", "W", "L", "Played"
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for (rank, entry) in standings.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>6}  {:<30} {:>4} {:>4} {:>7}\n",
            rank + 1,
            entry.id,
            entry.name,
            entry.wins,
            entry.losses(),
            entry.matches
        ));
    }

    out
}

/// Pairings as one numbered line per table
pub fn pairings_table(pairings: &[Pairing]) -> String {
    if pairings.is_empty() {
        return "No pairings (no players registered)\n".to_string();
    }

    pairings
        .iter()
        .enumerate()
        .map(|(board, p)| {
            format!(
                "Board {:>3}: {} ({}) vs {} ({})\n",
                board + 1,
                p.first.name,
                p.first.id,
                p.second.name,
                p.second.id
            )
        })
        .collect()
}

/// Pretty-printed JSON for any result
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// A command's confirmation line, or `value` as JSON when `json` is set
pub fn confirmation(
    json: bool,
    text: impl Into<String>,
    value: serde_json::Value,
) -> serde_json::Result<String> {
    if json {
        self::json(&value)
    } else {
        Ok(text.into())
    }
}
