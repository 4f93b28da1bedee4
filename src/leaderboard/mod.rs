pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Grade, Turn};
use crate::error::Result;

pub use sqlite::SqliteLeaderboard;

/// Trait for leaderboard storage implementations
#[async_trait]
pub trait Leaderboard: Send + Sync {
    /// Store a finished run
    async fn submit_score(&self, entry: NewLeaderboardEntry) -> Result<LeaderboardEntry>;

    /// Highest scores first, optionally for one starting word
    async fn top_scores(&self, limit: usize, starting_word: Option<&str>) -> Result<Vec<LeaderboardEntry>>;

    /// Best run of one player, optionally for one starting word
    async fn user_best_score(&self, user_id: &str, starting_word: Option<&str>) -> Result<Option<LeaderboardEntry>>;

    /// Get leaderboard statistics
    async fn stats(&self) -> Result<LeaderboardStats>;
}

/// Entry ready to be stored; `rank` is always computed server-side
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeaderboardEntry {
    pub user_id: String,
    pub score: u32,
    pub turns_count: u32,
    pub rank: Grade,
    pub starting_word: String,
    pub turns: Vec<Turn>,
}

/// Stored leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub user_id: String,
    pub score: u32,
    pub turns_count: u32,
    pub rank: Grade,
    pub starting_word: String,
    #[serde(default)]
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

/// Leaderboard statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_entries: u64,
    pub total_players: u64,
    pub best_score: Option<u32>,
    pub avg_score: f64,
}
