use thiserror::Error;

use crate::core::Rejection;

/// Main error type for the word-chain engine.
///
/// Move rejections are carried as [`Rejection`]; everything else here is a
/// failure of the surrounding system (storage, configuration, bad payloads).
#[derive(Error, Debug)]
pub enum WordChainError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A move was refused by the submission pipeline
    #[error("Move rejected: {0}")]
    Move(#[from] Rejection),

    /// Leaderboard submission payload is unusable
    #[error("Invalid score submission: {0}")]
    InvalidSubmission(String),

    /// Starting word is not part of the configured rotation
    #[error("Unknown starting word: {0}")]
    UnknownStartingWord(String),

    /// The starting word cannot change once a run has started
    #[error("Cannot change the starting word while a game is in progress")]
    SessionInProgress,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage layer errors that are not SQLite errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for WordChainError {
    fn from(s: String) -> Self {
        WordChainError::Other(s)
    }
}

impl From<&str> for WordChainError {
    fn from(s: &str) -> Self {
        WordChainError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WordChainError>;
