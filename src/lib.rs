//! # Word-Chain Engine
//!
//! Move validation and scoring for the word-chain game:
//! - Longest shared letter sequence between the current and the new word
//! - Edge / inner classification with length-growth bonus
//! - Append-only turn ledger and S-E rank bands
//! - SQLite leaderboard keyed by starting word
//! - Interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wordchain_engine::{GameConfig, WordChainEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = WordChainEngine::new("wordchain.db", GameConfig::default()).await?;
//!     let mut session = engine.new_session(Some("CORIANDER"))?;
//!
//!     match engine.submit_move(&mut session, "aria") {
//!         Ok(turn) => println!("{}", turn.describe()),
//!         Err(rejection) => println!("{}", rejection),
//!     }
//!
//!     session.end();
//!     engine.submit_score("player-1", session.submission()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod matching;
pub mod moves;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export primary types
pub use config::GameConfig;
pub use crate::core::{rank_of, Grade, Match, Placement, Rank, Rejection, Turn, TurnLedger, Word};
pub use engine::WordChainEngine;
pub use error::{Result, WordChainError};
pub use leaderboard::{Leaderboard, LeaderboardEntry, SqliteLeaderboard};
pub use matching::{LongestSequenceMatcher, SequenceMatcher};
pub use moves::{check_move, submit_move};
pub use session::{GameSession, GameSnapshot, GameSummary, ScoreSubmission, SessionStatus};
pub use store::GameStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
