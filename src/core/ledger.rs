use serde::{Deserialize, Serialize};

use crate::core::{rank_of, Rank, Turn};

/// Append-only, chronological record of accepted moves.
///
/// The first entry is the opening move of the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnLedger {
    turns: Vec<Turn>,
}

impl TurnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn as_slice(&self) -> &[Turn] {
        &self.turns
    }

    /// Cumulative score after the latest turn
    pub fn total(&self) -> u32 {
        self.turns.last().map(|t| t.running_total).unwrap_or(0)
    }

    /// Highest single-move award
    pub fn best_move(&self) -> u32 {
        self.turns.iter().map(|t| t.points).max().unwrap_or(0)
    }

    pub fn average_points(&self) -> f64 {
        if self.turns.is_empty() {
            0.0
        } else {
            self.total() as f64 / self.turns.len() as f64
        }
    }

    pub fn rank(&self) -> Rank {
        rank_of(self.total())
    }
}

impl<'a> IntoIterator for &'a TurnLedger {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grade, Placement};

    fn turn(points: u32, running_total: u32) -> Turn {
        Turn {
            from: "AB".to_string(),
            to: "AB".to_string(),
            sequence: "AB".to_string(),
            placement: Placement::Edge,
            sequence_points: points,
            length_bonus: 0,
            points,
            running_total,
        }
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = TurnLedger::new();
        assert_eq!(ledger.total(), 0);
        assert_eq!(ledger.best_move(), 0);
        assert_eq!(ledger.average_points(), 0.0);
        assert_eq!(ledger.rank().grade, Grade::E);
    }

    #[test]
    fn test_ledger_derived_values() {
        let mut ledger = TurnLedger::new();
        ledger.push(turn(6, 6));
        ledger.push(turn(5, 11));
        ledger.push(turn(9, 20));

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.total(), 20);
        assert_eq!(ledger.best_move(), 9);
        assert!((ledger.average_points() - 20.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(ledger.iter().next().map(|t| t.points), Some(6));
    }
}
