pub mod longest;
pub mod verify;

use crate::core::Match;

pub use longest::LongestSequenceMatcher;
pub use verify::verify_concatenation;

/// Trait for locating the scoring sequence between two words
pub trait SequenceMatcher: Send + Sync {
    /// Find the shared run of letters, or `None` when fewer than two letters overlap
    fn find(&self, base: &str, candidate: &str) -> Option<Match>;

    /// Get matcher name for logging
    fn name(&self) -> &str;
}
