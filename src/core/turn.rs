use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared run of letters between the base word and the candidate.
///
/// Indices are letter positions, not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub sequence: String,
    pub base_start_index: usize,
    pub word_start_index: usize,
}

impl Match {
    pub fn new(sequence: impl Into<String>, base_start_index: usize, word_start_index: usize) -> Self {
        Self {
            sequence: sequence.into(),
            base_start_index,
            word_start_index,
        }
    }

    /// Letters in the matched sequence
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Where the matched sequence sits inside the base word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Placement {
    /// Touches the first or last letter of the base word
    Edge,
    /// Fully interior
    Inner,
}

impl Placement {
    /// Per-letter multiplier for sequence points
    pub fn multiplier(self) -> u32 {
        match self {
            Placement::Edge => 1,
            Placement::Inner => 2,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Edge => f.write_str("Edge"),
            Placement::Inner => f.write_str("Inner"),
        }
    }
}

/// One validated, scored move.
///
/// The legacy browser client sends `type` and `totalScore`; both are accepted
/// when reading submitted turn lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub from: String,
    pub to: String,
    pub sequence: String,
    #[serde(alias = "type")]
    pub placement: Placement,
    pub sequence_points: u32,
    pub length_bonus: u32,
    pub points: u32,
    #[serde(alias = "totalScore")]
    pub running_total: u32,
}

impl Turn {
    /// Feedback line shown to the player after an accepted move
    pub fn describe(&self) -> String {
        let bonus = if self.length_bonus > 0 {
            format!(", +{} length bonus", self.length_bonus)
        } else {
            String::new()
        };

        format!(
            "+{} points ({} {}-letter sequence: \"{}\"{}).",
            self.points,
            self.placement,
            self.sequence.chars().count(),
            self.sequence,
            bonus
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_turn() -> Turn {
        Turn {
            from: "ARIA".to_string(),
            to: "ARIAN".to_string(),
            sequence: "ARIA".to_string(),
            placement: Placement::Edge,
            sequence_points: 4,
            length_bonus: 1,
            points: 5,
            running_total: 11,
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            sample_turn().describe(),
            "+5 points (Edge 4-letter sequence: \"ARIA\", +1 length bonus)."
        );

        let mut turn = sample_turn();
        turn.placement = Placement::Inner;
        turn.length_bonus = 0;
        turn.points = 8;
        assert_eq!(turn.describe(), "+8 points (Inner 4-letter sequence: \"ARIA\").");
    }

    #[test]
    fn test_turn_json_field_names() {
        let json = serde_json::to_value(sample_turn()).unwrap();
        assert_eq!(json["placement"], "EDGE");
        assert_eq!(json["sequencePoints"], 4);
        assert_eq!(json["runningTotal"], 11);
    }

    #[test]
    fn test_turn_accepts_client_aliases() {
        let json = r#"{
            "from": "CORIANDER", "to": "ARIA", "sequence": "RIA", "type": "INNER",
            "points": 6, "sequencePoints": 6, "lengthBonus": 0, "totalScore": 6
        }"#;
        let turn: Turn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.placement, Placement::Inner);
        assert_eq!(turn.running_total, 6);
    }
}
