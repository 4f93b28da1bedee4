use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Rejection;

/// Minimum number of letters in a playable word
pub const MIN_WORD_LEN: usize = 2;

/// An uppercase, A-Z only word of at least two letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Trim surrounding whitespace and uppercase
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Normalize `raw` and check it is a playable word.
    ///
    /// Length is checked before the alphabet, so `"1"` is `TooShort`.
    pub fn parse(raw: &str) -> Result<Self, Rejection> {
        let normalized = Self::normalize(raw);

        if normalized.chars().count() < MIN_WORD_LEN {
            return Err(Rejection::TooShort);
        }
        if !normalized.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Rejection::InvalidCharacters);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Word {
    type Error = Rejection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::parse(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let word = Word::parse("  aria \n").unwrap();
        assert_eq!(word.as_str(), "ARIA");
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(Word::parse("a"), Err(Rejection::TooShort));
        assert_eq!(Word::parse("   "), Err(Rejection::TooShort));
        // length gate runs first
        assert_eq!(Word::parse("1"), Err(Rejection::TooShort));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(Word::parse("W1RD"), Err(Rejection::InvalidCharacters));
        assert_eq!(Word::parse("ICE CREAM"), Err(Rejection::InvalidCharacters));
        assert_eq!(Word::parse("CAFÉ"), Err(Rejection::InvalidCharacters));
        assert_eq!(Word::parse("CAN'T"), Err(Rejection::InvalidCharacters));
    }

    #[test]
    fn test_deserialize_validates() {
        let word: Word = serde_json::from_str("\"mastodon\"").unwrap();
        assert_eq!(word.as_str(), "MASTODON");

        assert!(serde_json::from_str::<Word>("\"m4stodon\"").is_err());
    }
}
