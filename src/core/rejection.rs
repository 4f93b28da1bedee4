use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move was refused.
///
/// Every variant is recoverable: the session that produced it is left exactly
/// as it was before the submission.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Candidate has fewer than two letters
    #[error("New word must be at least 2 letters.")]
    TooShort,

    /// Candidate contains something other than A-Z
    #[error("New word must be letters only (A-Z).")]
    InvalidCharacters,

    /// No run of two or more letters is shared with the base word
    #[error("No contiguous sequence from {base} found in {candidate}. The new word must contain at least 2 consecutive letters from the current word.")]
    NoSequence { base: String, candidate: String },

    /// Matched run is not a clean prefix + sequence + suffix split of the candidate
    #[error("Letters cannot be inserted inside the sequence \"{sequence}\".")]
    NonContiguousInsertion { sequence: String },

    /// Timer expired or the run was ended
    #[error("The game is over. Start a new run to keep playing.")]
    GameOver,
}

impl Rejection {
    /// Stable machine-readable code, used by transports
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::TooShort => "too_short",
            Rejection::InvalidCharacters => "invalid_characters",
            Rejection::NoSequence { .. } => "no_sequence",
            Rejection::NonContiguousInsertion { .. } => "non_contiguous_insertion",
            Rejection::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::TooShort.to_string(), "New word must be at least 2 letters.");

        let no_seq = Rejection::NoSequence {
            base: "HELLO".to_string(),
            candidate: "XY".to_string(),
        };
        assert!(no_seq.to_string().starts_with("No contiguous sequence from HELLO found in XY."));
    }

    #[test]
    fn test_rejection_json_shape() {
        let json = serde_json::to_value(&Rejection::GameOver).unwrap();
        assert_eq!(json["reason"], "game_over");

        let json = serde_json::to_value(&Rejection::NonContiguousInsertion {
            sequence: "OR".to_string(),
        })
        .unwrap();
        assert_eq!(json["reason"], Rejection::NonContiguousInsertion { sequence: String::new() }.code());
        assert_eq!(json["sequence"], "OR");
    }
}
