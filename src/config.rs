//! Game configuration.
//!
//! Values come from a flat string map (environment or a config file section)
//! with a per-key fallback to defaults:
//!
//! - `starting_words`  : comma-separated rotation of starting words
//! - `time_limit_secs` : countdown length, started by the first accepted move
//! - `top_scores_limit`: default size of a leaderboard page
//! - `session_retention_secs`: how long a finished or untouched session stays in a [`crate::GameStore`]

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::core::Word;
use crate::error::{Result, WordChainError};

/// Words offered when no rotation is configured
pub const DEFAULT_STARTING_WORDS: [&str; 5] =
    ["CORIANDER", "CHEWINESS", "MASTODON", "SCUTTLING", "REWINDER"];

/// Environment variable prefix read by [`GameConfig::from_env`]
pub const ENV_PREFIX: &str = "WORDCHAIN_";

/// Game configuration with defaults matching the browser game.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use wordchain_engine::GameConfig;
///
/// let mut config = HashMap::new();
/// config.insert("starting_words".to_string(), "ember, otter".to_string());
///
/// let game = GameConfig::from_config(&config).unwrap();
/// assert_eq!(game.default_starting_word().as_str(), "EMBER");
/// assert_eq!(game.time_limit_secs, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// Rotation of starting words; the first one is the default. Never empty.
    starting_words: Vec<Word>,

    /// Countdown length in seconds
    pub time_limit_secs: u64,

    /// Default leaderboard page size
    pub top_scores_limit: usize,

    /// Retention of finished or idle sessions held in memory
    pub session_retention_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_words: DEFAULT_STARTING_WORDS
                .iter()
                .filter_map(|w| Word::parse(w).ok())
                .collect(),
            time_limit_secs: 60,
            top_scores_limit: 100,
            session_retention_secs: 300,
        }
    }
}

impl GameConfig {
    /// Default settings over a custom rotation. Fails on an empty rotation.
    pub fn with_starting_words(starting_words: Vec<Word>) -> Result<Self> {
        if starting_words.is_empty() {
            return Err(WordChainError::Config("starting_words is empty".to_string()));
        }

        Ok(Self {
            starting_words,
            ..Self::default()
        })
    }

    /// Build from a flat key/value map, keeping defaults for missing keys.
    pub fn from_config(config: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let starting_words = match config.get("starting_words") {
            Some(raw) => parse_word_list(raw)?,
            None => defaults.starting_words,
        };

        let time_limit_secs = match config.get("time_limit_secs") {
            Some(raw) => parse_number(raw, "time_limit_secs")?,
            None => defaults.time_limit_secs,
        };
        if time_limit_secs == 0 {
            return Err(WordChainError::Config("time_limit_secs must be positive".to_string()));
        }

        let top_scores_limit = match config.get("top_scores_limit") {
            Some(raw) => parse_number(raw, "top_scores_limit")?,
            None => defaults.top_scores_limit,
        };

        let session_retention_secs = match config.get("session_retention_secs") {
            Some(raw) => parse_number(raw, "session_retention_secs")?,
            None => defaults.session_retention_secs,
        };

        Ok(Self {
            starting_words,
            time_limit_secs,
            top_scores_limit,
            session_retention_secs,
        })
    }

    /// Read `WORDCHAIN_STARTING_WORDS`, `WORDCHAIN_TIME_LIMIT_SECS`,
    /// `WORDCHAIN_TOP_SCORES_LIMIT` and `WORDCHAIN_SESSION_RETENTION_SECS`.
    pub fn from_env() -> Result<Self> {
        let config: HashMap<String, String> = std::env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|k| (k.to_lowercase(), value))
            })
            .collect();

        Self::from_config(&config)
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn session_retention(&self) -> Duration {
        Duration::from_secs(self.session_retention_secs)
    }

    pub fn starting_words(&self) -> &[Word] {
        &self.starting_words
    }

    pub fn default_starting_word(&self) -> &Word {
        &self.starting_words[0]
    }

    /// Look up a configured starting word, case-insensitively
    pub fn starting_word(&self, raw: &str) -> Option<&Word> {
        let normalized = Word::normalize(raw);
        self.starting_words.iter().find(|w| w.as_str() == normalized)
    }

    /// Word after `current` in the rotation, wrapping around.
    ///
    /// An unknown word restarts the rotation at the first entry.
    pub fn next_word(&self, current: &str) -> &Word {
        let normalized = Word::normalize(current);
        let next = self
            .starting_words
            .iter()
            .position(|w| w.as_str() == normalized)
            .map(|i| (i + 1) % self.starting_words.len())
            .unwrap_or(0);

        &self.starting_words[next]
    }
}

fn parse_word_list(raw: &str) -> Result<Vec<Word>> {
    let words = raw
        .split(',')
        .filter(|w| !w.trim().is_empty())
        .map(|w| {
            Word::parse(w).map_err(|e| {
                WordChainError::Config(format!("invalid starting word '{}': {}", w.trim(), e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if words.is_empty() {
        return Err(WordChainError::Config("starting_words is empty".to_string()));
    }

    Ok(words)
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| WordChainError::Config(format!("{} is not a number: {}", key, raw)))
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.starting_words.iter().map(|w| w.as_str()).collect();
        write!(
            f,
            "words=[{}], time_limit={}s, top_scores_limit={}",
            words.join(", "),
            self.time_limit_secs,
            self.top_scores_limit
        )
    }
}
