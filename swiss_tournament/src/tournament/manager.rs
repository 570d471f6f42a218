//! Tournament manager tying the player and match stores to the standings
//! and pairing computations.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Pairing, PlayerId, RoundSummary, StandingsEntry};
use super::pairing::generate_pairings;
use super::standings::compute_standings;
use crate::db::{
    InMemoryRepository, MatchRepository, PgMatchRepository, PgPlayerRepository,
    PgSnapshotRepository, PlayerRepository, SnapshotRepository,
};
use log::{info, warn};
use sqlx::PgPool;
use std::sync::Arc;

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    players: Arc<dyn PlayerRepository>,
    matches: Arc<dyn MatchRepository>,
    snapshots: Arc<dyn SnapshotRepository>,
}

impl TournamentManager {
    /// Create a tournament manager over the given stores
    pub fn new(
        players: Arc<dyn PlayerRepository>,
        matches: Arc<dyn MatchRepository>,
        snapshots: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self {
            players,
            matches,
            snapshots,
        }
    }

    /// Create a tournament manager backed by PostgreSQL
    pub fn with_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgPlayerRepository::new(pool.clone())),
            Arc::new(PgMatchRepository::new(pool.clone())),
            Arc::new(PgSnapshotRepository::new(pool)),
        )
    }

    /// Create a tournament manager backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryRepository::new());
        Self::new(store.clone(), store.clone(), store)
    }

    /// Register a player. Names are trimmed and need not be unique.
    pub async fn register_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }

        let id = self.players.create_player(name).await?;
        info!("Registered player {} ({})", id, name);
        Ok(id)
    }

    /// Number of registered players
    pub async fn count_players(&self) -> TournamentResult<usize> {
        self.players.count_players().await
    }

    /// Name of a registered player
    pub async fn player_name(&self, id: PlayerId) -> TournamentResult<String> {
        self.players
            .find_by_id(id)
            .await?
            .map(|p| p.name)
            .ok_or(TournamentError::NotFound(id))
    }

    /// Record the outcome of a single match
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        if winner == loser {
            return Err(TournamentError::SelfMatch(winner));
        }

        for id in [winner, loser] {
            if self.players.find_by_id(id).await?.is_none() {
                warn!("Rejected match report naming unknown player {}", id);
                return Err(TournamentError::NotFound(id));
            }
        }

        self.matches.create_match(winner, loser).await?;
        info!("Recorded match: {} beat {}", winner, loser);
        Ok(())
    }

    /// Remove all match records
    pub async fn delete_matches(&self) -> TournamentResult<()> {
        self.matches.delete_all_matches().await?;
        info!("Deleted all matches");
        Ok(())
    }

    /// Remove all players along with their matches
    pub async fn delete_players(&self) -> TournamentResult<()> {
        self.matches.delete_all_matches().await?;
        self.players.delete_all_players().await?;
        info!("Deleted all players");
        Ok(())
    }

    /// Current standings, best record first
    ///
    /// Players and matches come from one snapshot, so a match reported while
    /// the standings are read cannot name a player missing from them.
    pub async fn player_standings(&self) -> TournamentResult<Vec<StandingsEntry>> {
        let snapshot = self.snapshots.load_snapshot().await?;
        compute_standings(&snapshot.players, &snapshot.matches)
    }

    /// Pairings for the next round
    pub async fn swiss_pairings(&self) -> TournamentResult<Vec<Pairing>> {
        let standings = self.player_standings().await?;
        generate_pairings(&standings)
    }

    /// Standings together with the pairings drawn from them
    pub async fn next_round(&self) -> TournamentResult<RoundSummary> {
        let standings = self.player_standings().await?;
        let pairings = generate_pairings(&standings)?;
        Ok(RoundSummary {
            standings,
            pairings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TournamentSnapshot;
    use crate::tournament::models::{MatchRecord, Player};
    use async_trait::async_trait;

    /// A store whose separate lists lag behind its snapshot, as happens when
    /// a player registers between the two reads
    struct LaggingStore {
        snapshot: TournamentSnapshot,
    }

    #[async_trait]
    impl PlayerRepository for LaggingStore {
        async fn create_player(&self, _name: &str) -> TournamentResult<PlayerId> {
            Ok(0)
        }

        async fn list_players(&self) -> TournamentResult<Vec<Player>> {
            Ok(self.snapshot.players[..1].to_vec())
        }

        async fn find_by_id(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
            Ok(self.snapshot.players.iter().find(|p| p.id == id).cloned())
        }

        async fn count_players(&self) -> TournamentResult<usize> {
            Ok(self.snapshot.players.len())
        }

        async fn delete_all_players(&self) -> TournamentResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl MatchRepository for LaggingStore {
        async fn create_match(&self, _winner: PlayerId, _loser: PlayerId) -> TournamentResult<()> {
            Ok(())
        }

        async fn list_matches(&self) -> TournamentResult<Vec<MatchRecord>> {
            Ok(self.snapshot.matches.clone())
        }

        async fn delete_all_matches(&self) -> TournamentResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl SnapshotRepository for LaggingStore {
        async fn load_snapshot(&self) -> TournamentResult<TournamentSnapshot> {
            Ok(self.snapshot.clone())
        }
    }

    #[tokio::test]
    async fn test_register_trims_and_rejects_blank_names() {
        let mgr = TournamentManager::in_memory();

        let id = mgr.register_player("  Boots O'Neal ").await.unwrap();
        assert_eq!(mgr.player_name(id).await.unwrap(), "Boots O'Neal");

        let err = mgr.register_player("   ").await.unwrap_err();
        assert!(matches!(err, TournamentError::InvalidName));
        assert_eq!(mgr.count_players().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let mgr = TournamentManager::in_memory();
        let a = mgr.register_player("Sam").await.unwrap();
        let b = mgr.register_player("Sam").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_player_name_unknown() {
        let mgr = TournamentManager::in_memory();
        let err = mgr.player_name(5).await.unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_report_match_validation() {
        let mgr = TournamentManager::in_memory();
        let a = mgr.register_player("A").await.unwrap();

        let err = mgr.report_match(a, a).await.unwrap_err();
        assert!(matches!(err, TournamentError::SelfMatch(id) if id == a));

        let err = mgr.report_match(a, 77).await.unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(77)));

        let standings = mgr.player_standings().await.unwrap();
        assert_eq!(standings[0].matches, 0);
    }

    #[tokio::test]
    async fn test_next_round_uses_one_snapshot() {
        let mgr = TournamentManager::in_memory();
        let a = mgr.register_player("A").await.unwrap();
        let b = mgr.register_player("B").await.unwrap();
        mgr.report_match(b, a).await.unwrap();

        let round = mgr.next_round().await.unwrap();
        assert_eq!(round.standings[0].id, b);
        assert_eq!(round.pairings.len(), 1);
        assert_eq!(round.pairings[0].ids(), (b, a));
    }

    #[tokio::test]
    async fn test_odd_field_cannot_be_paired() {
        let mgr = TournamentManager::in_memory();
        for name in ["A", "B", "C"] {
            mgr.register_player(name).await.unwrap();
        }
        let err = mgr.swiss_pairings().await.unwrap_err();
        assert!(matches!(err, TournamentError::OddPlayerCount(3)));
    }

    #[tokio::test]
    async fn test_standings_read_from_snapshot() {
        let store = Arc::new(LaggingStore {
            snapshot: TournamentSnapshot {
                players: vec![Player::new(1, "A"), Player::new(2, "B")],
                matches: vec![MatchRecord::new(2, 1)],
            },
        });
        let mgr = TournamentManager::new(store.clone(), store.clone(), store);

        let standings = mgr.player_standings().await.unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].id, 2);
        assert_eq!(standings[0].wins, 1);
    }
}
