//! Player and match store traits.
//!
//! The tournament core never opens connections itself; it reads snapshots
//! through these traits, so the same manager runs against PostgreSQL or the
//! in-memory store used by tests and the offline demo.

use async_trait::async_trait;
use log::debug;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::sync::Mutex;

use super::timeouts::{with_default_timeout, with_long_timeout};
use crate::tournament::{MatchRecord, Player, PlayerId, TournamentError, TournamentResult};

/// Trait for player store operations
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Register a player and return the assigned ID
    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId>;

    /// All players in registration order
    async fn list_players(&self) -> TournamentResult<Vec<Player>>;

    /// Find player by ID
    async fn find_by_id(&self, id: PlayerId) -> TournamentResult<Option<Player>>;

    /// Number of registered players
    async fn count_players(&self) -> TournamentResult<usize>;

    /// Remove every player (and, through the foreign keys, their matches)
    async fn delete_all_players(&self) -> TournamentResult<()>;
}

/// Trait for match store operations
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Record the outcome of one match
    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()>;

    /// All matches in the order they were reported
    async fn list_matches(&self) -> TournamentResult<Vec<MatchRecord>>;

    /// Remove every match
    async fn delete_all_matches(&self) -> TournamentResult<()>;
}

/// Players and matches read at the same point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentSnapshot {
    /// Players in registration order
    pub players: Vec<Player>,
    /// Matches in report order
    pub matches: Vec<MatchRecord>,
}

/// Trait for reading both tables together.
///
/// Reading players and matches through the two repositories separately can
/// observe a match whose players were registered after the player list was
/// read. A snapshot never does: every match in it names players in it.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Players and matches as one consistent read
    async fn load_snapshot(&self) -> TournamentResult<TournamentSnapshot>;
}

const LIST_PLAYERS: &str = "SELECT id, name FROM players ORDER BY id";
const LIST_MATCHES: &str = "SELECT winner, loser FROM matches ORDER BY id";

fn player_from_row(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        name: row.get("name"),
    }
}

fn match_from_row(row: &PgRow) -> MatchRecord {
    MatchRecord {
        winner: row.get("winner"),
        loser: row.get("loser"),
    }
}

/// Convert a SQL `COUNT(*)` into a length
fn row_count(count: i64) -> TournamentResult<usize> {
    usize::try_from(count)
        .map_err(|e| TournamentError::Database(sqlx::Error::Decode(Box::new(e))))
}

/// PostgreSQL implementation of `PlayerRepository`
#[derive(Clone)]
pub struct PgPlayerRepository {
    pool: PgPool,
}

impl PgPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let row = with_default_timeout(
            sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get("id"))
    }

    async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        let rows =
            with_default_timeout(sqlx::query(LIST_PLAYERS).fetch_all(&self.pool)).await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    async fn find_by_id(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        let row = with_default_timeout(
            sqlx::query("SELECT id, name FROM players WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    async fn count_players(&self) -> TournamentResult<usize> {
        let row = with_default_timeout(
            sqlx::query("SELECT COUNT(*) AS count FROM players").fetch_one(&self.pool),
        )
        .await?;

        row_count(row.get("count"))
    }

    async fn delete_all_players(&self) -> TournamentResult<()> {
        let result =
            with_long_timeout(sqlx::query("DELETE FROM players").execute(&self.pool)).await?;
        debug!("Deleted {} player rows", result.rows_affected());
        Ok(())
    }
}

/// PostgreSQL implementation of `MatchRepository`
#[derive(Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        with_default_timeout(
            sqlx::query("INSERT INTO matches (winner, loser) VALUES ($1, $2)")
                .bind(winner)
                .bind(loser)
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn list_matches(&self) -> TournamentResult<Vec<MatchRecord>> {
        let rows =
            with_default_timeout(sqlx::query(LIST_MATCHES).fetch_all(&self.pool)).await?;

        Ok(rows.iter().map(match_from_row).collect())
    }

    async fn delete_all_matches(&self) -> TournamentResult<()> {
        let result =
            with_long_timeout(sqlx::query("DELETE FROM matches").execute(&self.pool)).await?;
        debug!("Deleted {} match rows", result.rows_affected());
        Ok(())
    }
}

/// PostgreSQL implementation of `SnapshotRepository`
#[derive(Clone)]
pub struct PgSnapshotRepository {
    pool: PgPool,
}

impl PgSnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotRepository for PgSnapshotRepository {
    async fn load_snapshot(&self) -> TournamentResult<TournamentSnapshot> {
        with_default_timeout(async {
            let mut tx = self.pool.begin().await?;

            // Both SELECTs see the database as of the first one
            sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
                .execute(&mut *tx)
                .await?;
            let players = sqlx::query(LIST_PLAYERS).fetch_all(&mut *tx).await?;
            let matches = sqlx::query(LIST_MATCHES).fetch_all(&mut *tx).await?;
            tx.commit().await?;

            Ok::<_, sqlx::Error>(TournamentSnapshot {
                players: players.iter().map(player_from_row).collect(),
                matches: matches.iter().map(match_from_row).collect(),
            })
        })
        .await
    }
}

#[derive(Debug)]
struct MemoryState {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    next_id: PlayerId,
}

/// In-memory store implementing every repository trait.
///
/// Behaves like the PostgreSQL schema: IDs are serial and never reused,
/// matches must reference registered players, and removing players removes
/// their matches.
#[derive(Debug)]
pub struct InMemoryRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                players: Vec::new(),
                matches: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Preload a store with fixed players and matches
    pub fn with_data(players: Vec<Player>, matches: Vec<MatchRecord>) -> Self {
        let next_id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MemoryState {
                players,
                matches,
                next_id,
            }),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn create_player(&self, name: &str) -> TournamentResult<PlayerId> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state.players.push(Player::new(id, name));
        Ok(id)
    }

    async fn list_players(&self) -> TournamentResult<Vec<Player>> {
        let state = self.state.lock().await;
        let mut players = state.players.clone();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    async fn find_by_id(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        let state = self.state.lock().await;
        Ok(state.players.iter().find(|p| p.id == id).cloned())
    }

    async fn count_players(&self) -> TournamentResult<usize> {
        Ok(self.state.lock().await.players.len())
    }

    async fn delete_all_players(&self) -> TournamentResult<()> {
        let mut state = self.state.lock().await;
        state.players.clear();
        state.matches.clear();
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for InMemoryRepository {
    async fn create_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<()> {
        let mut state = self.state.lock().await;
        for id in [winner, loser] {
            if !state.players.iter().any(|p| p.id == id) {
                return Err(TournamentError::NotFound(id));
            }
        }
        state.matches.push(MatchRecord::new(winner, loser));
        Ok(())
    }

    async fn list_matches(&self) -> TournamentResult<Vec<MatchRecord>> {
        Ok(self.state.lock().await.matches.clone())
    }

    async fn delete_all_matches(&self) -> TournamentResult<()> {
        self.state.lock().await.matches.clear();
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn load_snapshot(&self) -> TournamentResult<TournamentSnapshot> {
        let state = self.state.lock().await;
        let mut players = state.players.clone();
        players.sort_by_key(|p| p.id);
        Ok(TournamentSnapshot {
            players,
            matches: state.matches.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_player_assigns_serial_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.create_player("Chandra Nalaar").await.unwrap();
        let second = repo.create_player("Jace Beleren").await.unwrap();

        assert_eq!(first, 1, "First player should have ID 1");
        assert_eq!(second, 2, "Second player should have ID 2");
        assert_eq!(repo.count_players().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryRepository::new();
        let id = repo.create_player("Chandra Nalaar").await.unwrap();

        let player = repo.find_by_id(id).await.unwrap();
        assert_eq!(player, Some(Player::new(id, "Chandra Nalaar")));

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_clear() {
        let repo = InMemoryRepository::new();
        repo.create_player("A").await.unwrap();
        repo.create_player("B").await.unwrap();
        repo.delete_all_players().await.unwrap();

        assert_eq!(repo.count_players().await.unwrap(), 0);
        assert_eq!(repo.create_player("C").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_match_with_unknown_player_rejected() {
        let repo = InMemoryRepository::new();
        let id = repo.create_player("A").await.unwrap();

        let err = repo.create_match(id, 42).await.unwrap_err();
        assert!(matches!(err, TournamentError::NotFound(42)));
        assert!(repo.list_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matches_listed_in_report_order() {
        let repo = InMemoryRepository::new();
        let a = repo.create_player("A").await.unwrap();
        let b = repo.create_player("B").await.unwrap();

        repo.create_match(a, b).await.unwrap();
        repo.create_match(b, a).await.unwrap();

        let matches = repo.list_matches().await.unwrap();
        assert_eq!(matches, vec![MatchRecord::new(a, b), MatchRecord::new(b, a)]);
    }

    #[tokio::test]
    async fn test_deleting_players_cascades_to_matches() {
        let repo = InMemoryRepository::new();
        let a = repo.create_player("A").await.unwrap();
        let b = repo.create_player("B").await.unwrap();
        repo.create_match(a, b).await.unwrap();

        repo.delete_all_players().await.unwrap();
        assert!(repo.list_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_matches_keeps_players() {
        let repo = InMemoryRepository::new();
        let a = repo.create_player("A").await.unwrap();
        let b = repo.create_player("B").await.unwrap();
        repo.create_match(a, b).await.unwrap();

        repo.delete_all_matches().await.unwrap();
        assert!(repo.list_matches().await.unwrap().is_empty());
        assert_eq!(repo.count_players().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_with_data_continues_id_sequence() {
        let repo = InMemoryRepository::with_data(
            vec![Player::new(10, "J"), Player::new(4, "D")],
            vec![MatchRecord::new(10, 4)],
        );

        let players = repo.list_players().await.unwrap();
        assert_eq!(players[0].id, 4);
        assert_eq!(players[1].id, 10);
        assert_eq!(repo.create_player("K").await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_snapshot_matches_separate_reads() {
        let repo = InMemoryRepository::with_data(
            vec![Player::new(2, "B"), Player::new(1, "A")],
            vec![MatchRecord::new(2, 1)],
        );

        let snapshot = repo.load_snapshot().await.unwrap();
        assert_eq!(snapshot.players, repo.list_players().await.unwrap());
        assert_eq!(snapshot.matches, repo.list_matches().await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_sees_players_of_every_match() {
        let repo = Arc::new(InMemoryRepository::new());
        let first = repo.create_player("First").await.unwrap();
        let second = repo.create_player("Second").await.unwrap();
        repo.create_match(first, second).await.unwrap();

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let a = repo.create_player("A").await.unwrap();
                    let b = repo.create_player("B").await.unwrap();
                    repo.create_match(a, b).await.unwrap();
                }
            })
        };

        for _ in 0..50 {
            let snapshot = repo.load_snapshot().await.unwrap();
            for record in &snapshot.matches {
                assert!(snapshot.players.iter().any(|p| p.id == record.winner));
                assert!(snapshot.players.iter().any(|p| p.id == record.loser));
            }
            tokio::task::yield_now().await;
        }

        writer.await.unwrap();
    }

    #[test]
    fn test_row_count_rejects_negative() {
        assert_eq!(row_count(3).unwrap(), 3);

        let err = row_count(-1).unwrap_err();
        assert!(matches!(err, TournamentError::Database(sqlx::Error::Decode(_))));
    }
}
