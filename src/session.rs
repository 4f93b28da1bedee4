use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::core::{Rank, Rejection, Turn, TurnLedger, Word};
use crate::error::{Result, WordChainError};
use crate::matching::SequenceMatcher;
use crate::moves::submit_move;

/// Why a run stopped accepting moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    TimeUp,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SessionStatus {
    /// No move accepted yet, countdown not running
    Ready,
    /// Countdown running
    Active,
    Over(GameOverReason),
}

/// Single-player game state, owned by the caller.
///
/// The countdown starts with the first accepted move. Once the session is
/// over every submission is refused with [`Rejection::GameOver`].
#[derive(Debug, Clone)]
pub struct GameSession {
    starting_word: Word,
    current_word: Word,
    previous_word_length: usize,
    cumulative_score: u32,
    ledger: TurnLedger,
    status: SessionStatus,
    time_limit: Duration,
    started_at: Option<Instant>,
}

impl GameSession {
    pub fn new(starting_word: Word, time_limit: Duration) -> Self {
        Self {
            previous_word_length: starting_word.len(),
            current_word: starting_word.clone(),
            starting_word,
            cumulative_score: 0,
            ledger: TurnLedger::new(),
            status: SessionStatus::Ready,
            time_limit,
            started_at: None,
        }
    }

    pub fn starting_word(&self) -> &Word {
        &self.starting_word
    }

    pub fn current_word(&self) -> &Word {
        &self.current_word
    }

    pub fn previous_word_length(&self) -> usize {
        self.previous_word_length
    }

    pub fn score(&self) -> u32 {
        self.cumulative_score
    }

    pub fn turns(&self) -> &TurnLedger {
        &self.ledger
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::Over(_))
    }

    /// Time left on the countdown; the full limit before the first move
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match (self.status, self.started_at) {
            (SessionStatus::Over(_), _) => Duration::ZERO,
            (_, Some(started)) => self
                .time_limit
                .saturating_sub(now.saturating_duration_since(started)),
            (_, None) => self.time_limit,
        }
    }

    /// Mark the session over if the countdown has run out. Returns true when over.
    pub fn expire_if_due(&mut self, now: Instant) -> bool {
        if self.status == SessionStatus::Active && self.remaining_at(now).is_zero() {
            tracing::debug!("Time up for run from {}", self.starting_word);
            self.status = SessionStatus::Over(GameOverReason::TimeUp);
        }
        self.is_over()
    }

    /// Evaluate and, only if accepted, commit a move
    pub fn play_at(
        &mut self,
        matcher: &dyn SequenceMatcher,
        raw_candidate: &str,
        now: Instant,
    ) -> std::result::Result<&Turn, Rejection> {
        if self.expire_if_due(now) {
            return Err(Rejection::GameOver);
        }

        let turn = submit_move(
            matcher,
            self.current_word.as_str(),
            raw_candidate,
            self.previous_word_length,
            self.cumulative_score,
        )?;

        self.commit(turn, now)
    }

    pub fn play(
        &mut self,
        matcher: &dyn SequenceMatcher,
        raw_candidate: &str,
    ) -> std::result::Result<&Turn, Rejection> {
        self.play_at(matcher, raw_candidate, Instant::now())
    }

    fn commit(&mut self, turn: Turn, now: Instant) -> std::result::Result<&Turn, Rejection> {
        // the pipeline only emits turns whose target passed Word::parse
        let next_word = Word::parse(&turn.to)?;

        if self.status == SessionStatus::Ready {
            self.status = SessionStatus::Active;
            self.started_at = Some(now);
        }

        self.previous_word_length = next_word.len();
        self.current_word = next_word;
        self.cumulative_score = turn.running_total;

        Ok(self.ledger.push(turn))
    }

    /// End the run early
    pub fn end(&mut self) {
        if !self.is_over() {
            self.status = SessionStatus::Over(GameOverReason::Ended);
        }
    }

    /// Back to the starting word with a clean ledger
    pub fn reset(&mut self) {
        self.current_word = self.starting_word.clone();
        self.previous_word_length = self.starting_word.len();
        self.cumulative_score = 0;
        self.ledger.clear();
        self.status = SessionStatus::Ready;
        self.started_at = None;
    }

    /// Pick a different starting word. Only allowed before the first move.
    pub fn change_word(&mut self, word: Word) -> Result<()> {
        if self.status != SessionStatus::Ready {
            return Err(WordChainError::SessionInProgress);
        }

        self.starting_word = word;
        self.reset();
        Ok(())
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            starting_word: self.starting_word.to_string(),
            score: self.cumulative_score,
            rank: self.ledger.rank(),
            turns_count: self.ledger.len(),
            average_points: self.ledger.average_points(),
            best_move: self.ledger.best_move(),
        }
    }

    /// Leaderboard payload for this run
    pub fn submission(&self) -> ScoreSubmission {
        ScoreSubmission {
            score: self.cumulative_score,
            turns_count: self.ledger.len() as u32,
            starting_word: Some(self.starting_word.to_string()),
            turns: self.ledger.as_slice().to_vec(),
        }
    }

    pub fn snapshot_at(&self, now: Instant) -> GameSnapshot {
        GameSnapshot {
            starting_word: self.starting_word.to_string(),
            current_word: self.current_word.to_string(),
            score: self.cumulative_score,
            previous_word_length: self.previous_word_length,
            status: self.status,
            remaining_secs: self.remaining_at(now).as_secs(),
            turns: self.ledger.as_slice().to_vec(),
        }
    }
}

/// End-of-game figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub starting_word: String,
    pub score: u32,
    pub rank: Rank,
    pub turns_count: usize,
    pub average_points: f64,
    pub best_move: u32,
}

/// What a client sends to the leaderboard.
///
/// There is no rank field: the server derives it from `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub score: u32,
    pub turns_count: u32,
    #[serde(default)]
    pub starting_word: Option<String>,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

/// Serializable view of a session for transports
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub starting_word: String,
    pub current_word: String,
    pub score: u32,
    pub previous_word_length: usize,
    pub status: SessionStatus,
    pub remaining_secs: u64,
    pub turns: Vec<Turn>,
}
