use serde::{Deserialize, Serialize};

use crate::core::{Match, Placement};

/// Point award for one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub placement: Placement,
    pub sequence_points: u32,
    pub length_bonus: u32,
    pub points: u32,
}

/// Edge when the match touches the first or last letter of the base word
pub fn placement_of(base_len: usize, m: &Match) -> Placement {
    if m.base_start_index == 0 || m.base_start_index + m.len() == base_len {
        Placement::Edge
    } else {
        Placement::Inner
    }
}

/// Classify the match and compute its award.
///
/// `m` must already be structurally verified. The length bonus rewards
/// growth over the previous word and is never negative.
pub fn classify_and_score(
    base_len: usize,
    m: &Match,
    previous_word_length: usize,
    candidate_len: usize,
) -> Score {
    let placement = placement_of(base_len, m);
    let sequence_points = m.len() as u32 * placement.multiplier();
    let length_bonus = candidate_len.saturating_sub(previous_word_length) as u32;

    Score {
        placement,
        sequence_points,
        length_bonus,
        points: sequence_points + length_bonus,
    }
}
