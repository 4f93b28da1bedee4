use crate::core::{Match, MIN_WORD_LEN};
use crate::matching::SequenceMatcher;

/// Exhaustive longest-common-substring matcher.
///
/// Every substring of the base word with at least two letters is tried,
/// start index ascending then end index ascending, and looked up as the
/// leftmost occurrence in the candidate. Only a strictly longer hit replaces
/// the current best, so among equally long sequences the one starting
/// earliest in the base word wins.
pub struct LongestSequenceMatcher;

impl LongestSequenceMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LongestSequenceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceMatcher for LongestSequenceMatcher {
    fn find(&self, base: &str, candidate: &str) -> Option<Match> {
        let letters: Vec<char> = base.chars().collect();
        let mut best: Option<Match> = None;
        let mut best_len = 0;

        for start in 0..letters.len() {
            for end in (start + MIN_WORD_LEN)..=letters.len() {
                let len = end - start;
                if len <= best_len {
                    continue;
                }

                let sequence: String = letters[start..end].iter().collect();
                match candidate.find(&sequence) {
                    Some(byte_index) => {
                        let word_start_index = candidate[..byte_index].chars().count();
                        best_len = len;
                        best = Some(Match::new(sequence, start, word_start_index));
                    }
                    // a longer run from the same start cannot occur either
                    None => break,
                }
            }
        }

        best
    }

    fn name(&self) -> &str {
        "longest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(base: &str, candidate: &str) -> Option<Match> {
        LongestSequenceMatcher::new().find(base, candidate)
    }

    #[test]
    fn test_self_match_is_full_word() {
        for word in ["CORIANDER", "CHEWINESS", "MASTODON", "AB"] {
            let m = find(word, word).unwrap();
            assert_eq!(m.sequence, word);
            assert_eq!(m.base_start_index, 0);
            assert_eq!(m.word_start_index, 0);
        }
    }

    #[test]
    fn test_coriander_aria() {
        let m = find("CORIANDER", "ARIA").unwrap();
        assert_eq!(m, Match::new("RIA", 2, 1));
    }

    #[test]
    fn test_no_shared_sequence() {
        assert!(find("HELLO", "XY").is_none());
        // single shared letters do not count
        assert!(find("HELLO", "OH").is_none());
        assert!(find("A", "A").is_none());
    }

    #[test]
    fn test_longest_wins() {
        let m = find("ABCDE", "ABZCDE").unwrap();
        assert_eq!(m, Match::new("CDE", 2, 3));
    }

    #[test]
    fn test_tie_goes_to_leftmost_in_base() {
        // "AB" and "CD" both shared, both length 2
        let m = find("ABXCD", "CDAB").unwrap();
        assert_eq!(m.sequence, "AB");
        assert_eq!(m.base_start_index, 0);
        assert_eq!(m.word_start_index, 2);
    }

    #[test]
    fn test_leftmost_occurrence_in_candidate() {
        let m = find("ORE", "MOREORE").unwrap();
        assert_eq!(m, Match::new("ORE", 0, 1));
    }

    #[test]
    fn test_repeated_letters_in_base() {
        // "OD" and "DO" are both shared, "ODO" at 4 is longer
        let m = find("MASTODON", "RODOLF").unwrap();
        assert_eq!(m, Match::new("ODO", 4, 1));
    }

    #[test]
    fn test_never_shorter_than_another_shared_substring() {
        let pairs = [
            ("SCUTTLING", "CUTTLE"),
            ("REWINDER", "WINDERS"),
            ("CHEWINESS", "WINE"),
            ("CORIANDER", "DANDER"),
        ];
        for (base, candidate) in pairs {
            let best = find(base, candidate).unwrap().len();
            let letters: Vec<char> = base.chars().collect();
            for start in 0..letters.len() {
                for end in start + 2..=letters.len() {
                    let sub: String = letters[start..end].iter().collect();
                    if candidate.contains(&sub) {
                        assert!(best >= sub.len(), "{} beat {} for {}/{}", sub, best, base, candidate);
                    }
                }
            }
        }
    }
}
