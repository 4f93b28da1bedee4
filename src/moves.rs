use crate::core::{Rejection, Turn, Word};
use crate::matching::{verify_concatenation, SequenceMatcher};
use crate::scoring::classify_and_score;

/// Evaluate one move.
///
/// Gates run in order and the first failure is returned: length, alphabet,
/// shared sequence, structural check. Nothing is committed here; the caller
/// advances its session only with the returned turn, whose `running_total`
/// is the new cumulative score.
pub fn submit_move(
    matcher: &dyn SequenceMatcher,
    base: &str,
    raw_candidate: &str,
    previous_word_length: usize,
    cumulative_score: u32,
) -> Result<Turn, Rejection> {
    let base = Word::normalize(base);
    let candidate = Word::parse(raw_candidate)?;

    let found = matcher.find(&base, candidate.as_str()).ok_or_else(|| Rejection::NoSequence {
        base: base.clone(),
        candidate: candidate.to_string(),
    })?;

    if !verify_concatenation(candidate.as_str(), &found.sequence, found.word_start_index) {
        return Err(Rejection::NonContiguousInsertion {
            sequence: found.sequence,
        });
    }

    let score = classify_and_score(
        base.chars().count(),
        &found,
        previous_word_length,
        candidate.len(),
    );

    tracing::debug!(
        "{} -> {} via \"{}\" ({} by {}): +{}",
        base,
        candidate,
        found.sequence,
        score.placement,
        matcher.name(),
        score.points
    );

    Ok(Turn {
        from: base,
        to: candidate.into_inner(),
        sequence: found.sequence,
        placement: score.placement,
        sequence_points: score.sequence_points,
        length_bonus: score.length_bonus,
        points: score.points,
        running_total: cumulative_score.saturating_add(score.points),
    })
}

/// Evaluate a move from `base` as the opening move of a fresh game.
///
/// The previous word length is taken from the normalized base, the same
/// word the move is scored against.
pub fn check_move(matcher: &dyn SequenceMatcher, base: &str, raw_candidate: &str) -> Result<Turn, Rejection> {
    let base_len = Word::normalize(base).chars().count();
    submit_move(matcher, base, raw_candidate, base_len, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Match, Placement};
    use crate::matching::LongestSequenceMatcher;

    fn submit(base: &str, candidate: &str, prev_len: usize, total: u32) -> Result<Turn, Rejection> {
        submit_move(&LongestSequenceMatcher::new(), base, candidate, prev_len, total)
    }

    /// Returns a sequence shifted one letter to the right of where it really is
    struct OffByOneMatcher;

    impl SequenceMatcher for OffByOneMatcher {
        fn find(&self, base: &str, candidate: &str) -> Option<Match> {
            LongestSequenceMatcher::new()
                .find(base, candidate)
                .map(|m| Match::new(m.sequence, m.base_start_index, m.word_start_index + 1))
        }

        fn name(&self) -> &str {
            "off-by-one"
        }
    }

    #[test]
    fn test_coriander_to_aria() {
        let turn = submit("CORIANDER", "aria", 9, 0).unwrap();
        assert_eq!(turn.from, "CORIANDER");
        assert_eq!(turn.to, "ARIA");
        assert_eq!(turn.sequence, "RIA");
        assert_eq!(turn.placement, Placement::Inner);
        assert_eq!(turn.sequence_points, 6);
        assert_eq!(turn.length_bonus, 0);
        assert_eq!(turn.points, 6);
        assert_eq!(turn.running_total, 6);
    }

    #[test]
    fn test_aria_to_arian() {
        let turn = submit("ARIA", " Arian ", 4, 6).unwrap();
        assert_eq!(turn.sequence, "ARIA");
        assert_eq!(turn.placement, Placement::Edge);
        assert_eq!(turn.points, 5);
        assert_eq!(turn.running_total, 11);
    }

    #[test]
    fn test_gate_order() {
        assert_eq!(submit("HELLO", "H", 5, 0), Err(Rejection::TooShort));
        assert_eq!(submit("WORD", "W1RD", 4, 0), Err(Rejection::InvalidCharacters));
        assert_eq!(
            submit("HELLO", "XY", 5, 0),
            Err(Rejection::NoSequence {
                base: "HELLO".to_string(),
                candidate: "XY".to_string(),
            })
        );
    }

    #[test]
    fn test_rejection_is_repeatable() {
        let first = submit("WORD", "W1RD", 4, 10);
        for _ in 0..3 {
            assert_eq!(submit("WORD", "W1RD", 4, 10), first);
        }
    }

    #[test]
    fn test_non_contiguous_match_rejected() {
        let result = submit_move(&OffByOneMatcher, "CORIANDER", "ARIA", 9, 0);
        assert_eq!(
            result,
            Err(Rejection::NonContiguousInsertion {
                sequence: "RIA".to_string(),
            })
        );
    }

    #[test]
    fn test_self_match_scores_full_length() {
        for word in ["MASTODON", "SCUTTLING", "REWINDER"] {
            let turn = submit(word, word, word.len(), 0).unwrap();
            assert_eq!(turn.sequence, word);
            assert_eq!(turn.placement, Placement::Edge);
            assert_eq!(turn.sequence_points as usize, word.len());
            assert_eq!(turn.length_bonus, 0);
        }
    }

    #[test]
    fn test_lowercase_base_is_normalized() {
        let turn = submit("  coriander", "ARIA", 9, 0).unwrap();
        assert_eq!(turn.from, "CORIANDER");
        assert_eq!(turn.sequence, "RIA");
    }

    #[test]
    fn test_check_move_uses_normalized_base_length() {
        let matcher = LongestSequenceMatcher::new();

        let turn = check_move(&matcher, "  aria ", "arian").unwrap();
        assert_eq!(turn.length_bonus, 1);
        assert_eq!(turn.points, 5);

        // uppercasing can lengthen a word: "straße" scores as "STRASSE"
        let turn = check_move(&matcher, "straße", "STRASSES").unwrap();
        assert_eq!(turn.from, "STRASSE");
        assert_eq!(turn.sequence, "STRASSE");
        assert_eq!(turn.length_bonus, 1);
        assert_eq!(turn.points, 8);
    }
}
