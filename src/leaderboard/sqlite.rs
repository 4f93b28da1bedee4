use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{Grade, Turn, Word};
use crate::error::{Result, WordChainError};
use crate::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardStats, NewLeaderboardEntry};

const SELECT_ENTRY: &str = "SELECT id, user_id, score, turns_count, rank, starting_word, turns, created_at
     FROM leaderboard_entries";

/// SQLite-based leaderboard implementation
///
/// Schema:
/// ```sql
/// CREATE TABLE leaderboard_entries (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id TEXT NOT NULL,
///     score INTEGER NOT NULL,
///     turns_count INTEGER NOT NULL,
///     rank TEXT NOT NULL,
///     starting_word TEXT NOT NULL DEFAULT 'CORIANDER',
///     turns TEXT,
///     created_at TEXT NOT NULL
/// );
/// ```
pub struct SqliteLeaderboard {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLeaderboard {
    /// Open (or create) the leaderboard at `db_path`; `":memory:"` works for tests
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS leaderboard_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                score INTEGER NOT NULL,
                turns_count INTEGER NOT NULL,
                rank TEXT NOT NULL,
                starting_word TEXT NOT NULL DEFAULT 'CORIANDER',
                turns TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_word_score ON leaderboard_entries(starting_word, score DESC)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_user ON leaderboard_entries(user_id)",
            [],
        )?;

        tracing::debug!("Leaderboard opened at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| WordChainError::Storage("leaderboard connection lock poisoned".to_string()))
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LeaderboardEntry> {
    let rank_letter: String = row.get(4)?;
    let rank: Grade = rank_letter
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(WordChainError::Other(e))))?;

    let turns_json: Option<String> = row.get(6)?;
    let turns: Vec<Turn> = match turns_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        None => Vec::new(),
    };

    let created_at: String = row.get(7)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(LeaderboardEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        score: row.get(2)?,
        turns_count: row.get(3)?,
        rank,
        starting_word: row.get(5)?,
        turns,
        created_at,
    })
}

#[async_trait]
impl Leaderboard for SqliteLeaderboard {
    async fn submit_score(&self, entry: NewLeaderboardEntry) -> Result<LeaderboardEntry> {
        let starting_word = Word::normalize(&entry.starting_word);
        let turns_json = serde_json::to_string(&entry.turns)?;
        let created_at = Utc::now();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO leaderboard_entries (user_id, score, turns_count, rank, starting_word, turns, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.user_id,
                entry.score,
                entry.turns_count,
                entry.rank.letter(),
                starting_word,
                turns_json,
                created_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(LeaderboardEntry {
            id,
            user_id: entry.user_id,
            score: entry.score,
            turns_count: entry.turns_count,
            rank: entry.rank,
            starting_word,
            turns: entry.turns,
            created_at,
        })
    }

    async fn top_scores(&self, limit: usize, starting_word: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
        let starting_word = starting_word.map(Word::normalize);
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE (?1 IS NULL OR starting_word = ?1) ORDER BY score DESC, id ASC LIMIT ?2",
            SELECT_ENTRY
        ))?;
        let entries = stmt
            .query_map(params![starting_word, limit as i64], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    async fn user_best_score(&self, user_id: &str, starting_word: Option<&str>) -> Result<Option<LeaderboardEntry>> {
        let starting_word = starting_word.map(Word::normalize);
        let conn = self.lock()?;

        let entry = conn
            .query_row(
                &format!(
                    "{} WHERE user_id = ?1 AND (?2 IS NULL OR starting_word = ?2) ORDER BY score DESC, id ASC LIMIT 1",
                    SELECT_ENTRY
                ),
                params![user_id, starting_word],
                entry_from_row,
            )
            .optional()?;

        Ok(entry)
    }

    async fn stats(&self) -> Result<LeaderboardStats> {
        let conn = self.lock()?;

        let (total_entries, total_players, best_score, avg_score) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT user_id), MAX(score), AVG(score) FROM leaderboard_entries",
            [],
            |row| {
                Ok((
                    row.get::<_, u64>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, Option<u32>>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                ))
            },
        )?;

        Ok(LeaderboardStats {
            total_entries,
            total_players,
            best_score,
            avg_score: avg_score.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Placement;

    fn entry(user_id: &str, score: u32, starting_word: &str) -> NewLeaderboardEntry {
        NewLeaderboardEntry {
            user_id: user_id.to_string(),
            score,
            turns_count: 1,
            rank: Grade::from_score(score),
            starting_word: starting_word.to_string(),
            turns: vec![Turn {
                from: "CORIANDER".to_string(),
                to: "ARIA".to_string(),
                sequence: "RIA".to_string(),
                placement: Placement::Inner,
                sequence_points: 6,
                length_bonus: 0,
                points: 6,
                running_total: 6,
            }],
        }
    }

    #[tokio::test]
    async fn test_leaderboard_create() {
        let board = SqliteLeaderboard::new(":memory:").await.unwrap();
        let stats = board.stats().await.unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.best_score, None);
        assert_eq!(stats.avg_score, 0.0);
    }

    #[tokio::test]
    async fn test_submit_and_read_back() {
        let board = SqliteLeaderboard::new(":memory:").await.unwrap();

        let stored = board.submit_score(entry("alice", 92, "coriander")).await.unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.starting_word, "CORIANDER");
        assert_eq!(stored.rank, Grade::A);

        let top = board.top_scores(10, None).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, stored.id);
        assert_eq!(top[0].user_id, "alice");
        assert_eq!(top[0].rank, Grade::A);
        assert_eq!(top[0].turns.len(), 1);
        assert_eq!(top[0].turns[0].sequence, "RIA");
    }

    #[tokio::test]
    async fn test_top_scores_order_limit_and_filter() {
        let board = SqliteLeaderboard::new(":memory:").await.unwrap();

        board.submit_score(entry("alice", 40, "CORIANDER")).await.unwrap();
        board.submit_score(entry("bob", 95, "CORIANDER")).await.unwrap();
        board.submit_score(entry("carol", 70, "MASTODON")).await.unwrap();
        board.submit_score(entry("dave", 40, "CORIANDER")).await.unwrap();

        let all = board.top_scores(10, None).await.unwrap();
        let scores: Vec<u32> = all.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![95, 70, 40, 40]);
        // equal scores keep submission order
        assert_eq!(all[2].user_id, "alice");
        assert_eq!(all[3].user_id, "dave");

        let coriander = board.top_scores(2, Some("coriander")).await.unwrap();
        let users: Vec<&str> = coriander.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(users, vec!["bob", "alice"]);

        assert!(board.top_scores(10, Some("REWINDER")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_best_score() {
        let board = SqliteLeaderboard::new(":memory:").await.unwrap();

        board.submit_score(entry("alice", 40, "CORIANDER")).await.unwrap();
        board.submit_score(entry("alice", 81, "MASTODON")).await.unwrap();
        board.submit_score(entry("alice", 65, "CORIANDER")).await.unwrap();

        let best = board.user_best_score("alice", None).await.unwrap().unwrap();
        assert_eq!(best.score, 81);

        let best = board.user_best_score("alice", Some("CORIANDER")).await.unwrap().unwrap();
        assert_eq!(best.score, 65);
        assert_eq!(best.rank, Grade::C);

        assert!(board.user_best_score("bob", None).await.unwrap().is_none());
        assert!(board.user_best_score("alice", Some("REWINDER")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_leaderboard_stats() {
        let board = SqliteLeaderboard::new(":memory:").await.unwrap();

        board.submit_score(entry("alice", 40, "CORIANDER")).await.unwrap();
        board.submit_score(entry("alice", 60, "CORIANDER")).await.unwrap();
        board.submit_score(entry("bob", 100, "MASTODON")).await.unwrap();

        let stats = board.stats().await.unwrap();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_players, 2);
        assert_eq!(stats.best_score, Some(100));
        assert!((stats.avg_score - 200.0 / 3.0).abs() < 1e-9);
    }
}
