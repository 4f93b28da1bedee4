/// Check that `candidate` is exactly prefix + `sequence` + suffix with the
/// sequence starting at letter `word_start_index`.
///
/// Always true for sequences located by direct substring search. A matcher
/// that returns an interrupted or shifted sequence fails here.
pub fn verify_concatenation(candidate: &str, sequence: &str, word_start_index: usize) -> bool {
    let seq_len = sequence.chars().count();

    let prefix: String = candidate.chars().take(word_start_index).collect();
    let suffix: String = candidate.chars().skip(word_start_index + seq_len).collect();

    let rebuilt = format!("{}{}{}", prefix, sequence, suffix);
    rebuilt == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_concatenation() {
        assert!(verify_concatenation("ARIA", "RIA", 1));
        assert!(verify_concatenation("ARIAN", "ARIA", 0));
        assert!(verify_concatenation("MOTOR", "OR", 3));
    }

    #[test]
    fn test_shifted_index_fails() {
        assert!(!verify_concatenation("ARIA", "RIA", 0));
        assert!(!verify_concatenation("ARIAN", "ARIA", 1));
    }

    #[test]
    fn test_interrupted_sequence_fails() {
        // "WORD" with a letter pushed into the middle
        assert!(!verify_concatenation("WOXRD", "WORD", 0));
    }

    #[test]
    fn test_sequence_past_end_fails() {
        assert!(!verify_concatenation("AB", "ABC", 0));
        assert!(!verify_concatenation("AB", "AB", 5));
    }
}
