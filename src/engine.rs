use std::sync::Arc;

use crate::config::GameConfig;
use crate::core::{rank_of, Rejection, Turn, Word};
use crate::error::{Result, WordChainError};
use crate::leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardStats, NewLeaderboardEntry, SqliteLeaderboard};
use crate::matching::{LongestSequenceMatcher, SequenceMatcher};
use crate::session::{GameSession, ScoreSubmission};

/// Main word-chain orchestrator
pub struct WordChainEngine {
    leaderboard: Arc<dyn Leaderboard>,
    matcher: Arc<dyn SequenceMatcher>,
    config: GameConfig,
}

impl WordChainEngine {
    /// Create new engine with a SQLite leaderboard
    pub async fn new(db_path: impl AsRef<str>, config: GameConfig) -> Result<Self> {
        let leaderboard = Arc::new(SqliteLeaderboard::new(db_path.as_ref()).await?);
        Ok(Self::with_leaderboard(leaderboard, config))
    }

    /// Create engine over any leaderboard backend
    pub fn with_leaderboard(leaderboard: Arc<dyn Leaderboard>, config: GameConfig) -> Self {
        tracing::info!("Word-chain engine ready: {}", config);

        Self {
            leaderboard,
            matcher: Arc::new(LongestSequenceMatcher::new()),
            config,
        }
    }

    /// Swap the sequence matcher
    pub fn with_matcher(mut self, matcher: Arc<dyn SequenceMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn matcher(&self) -> &dyn SequenceMatcher {
        self.matcher.as_ref()
    }

    /// Start a run from a configured starting word (default: the first one)
    pub fn new_session(&self, starting_word: Option<&str>) -> Result<GameSession> {
        let word = match starting_word {
            Some(raw) => self
                .config
                .starting_word(raw)
                .ok_or_else(|| WordChainError::UnknownStartingWord(Word::normalize(raw)))?,
            None => self.config.default_starting_word(),
        };

        Ok(GameSession::new(word.clone(), self.config.time_limit()))
    }

    /// Move the session on to the next word in the rotation. Only before the first move.
    pub fn cycle_word(&self, session: &mut GameSession) -> Result<()> {
        let next = self.config.next_word(session.starting_word().as_str()).clone();
        session.change_word(next)
    }

    /// Evaluate a move against the session and commit it when accepted
    pub fn submit_move(&self, session: &mut GameSession, raw_candidate: &str) -> std::result::Result<Turn, Rejection> {
        let result = session.play(self.matcher.as_ref(), raw_candidate).cloned();

        if let Err(rejection) = &result {
            tracing::debug!("Rejected '{}' from {}: {}", raw_candidate, session.current_word(), rejection.code());
        }

        result
    }

    /// Store a finished run for `user_id`.
    ///
    /// The rank is derived from the submitted score here, never taken from the client.
    pub async fn submit_score(&self, user_id: &str, submission: ScoreSubmission) -> Result<LeaderboardEntry> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(WordChainError::InvalidSubmission("missing user id".to_string()));
        }

        let starting_word = match submission.starting_word.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Word::parse(raw)
                .map_err(|e| WordChainError::InvalidSubmission(format!("starting word: {}", e)))?,
            _ => self.config.default_starting_word().clone(),
        };

        let rank = rank_of(submission.score);

        let entry = self
            .leaderboard
            .submit_score(NewLeaderboardEntry {
                user_id: user_id.to_string(),
                score: submission.score,
                turns_count: submission.turns_count,
                rank: rank.grade,
                starting_word: starting_word.into_inner(),
                turns: submission.turns,
            })
            .await?;

        tracing::info!(
            "Score stored: {} scored {} ({}) on {}",
            entry.user_id,
            entry.score,
            entry.rank,
            entry.starting_word
        );

        Ok(entry)
    }

    /// Top scores for a starting word (default: configured default word and page size)
    pub async fn top_scores(&self, limit: Option<usize>, starting_word: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit.filter(|l| *l > 0).unwrap_or(self.config.top_scores_limit);
        let word = starting_word
            .map(Word::normalize)
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| self.config.default_starting_word().to_string());

        self.leaderboard.top_scores(limit, Some(&word)).await
    }

    /// Best entry for a player; a missing or blank word spans all starting words
    pub async fn user_best_score(&self, user_id: &str, starting_word: Option<&str>) -> Result<Option<LeaderboardEntry>> {
        let word = starting_word.map(Word::normalize).filter(|w| !w.is_empty());

        self.leaderboard.user_best_score(user_id, word.as_deref()).await
    }

    /// Get leaderboard statistics
    pub async fn stats(&self) -> Result<LeaderboardStats> {
        self.leaderboard.stats().await
    }
}
