use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade for a cumulative score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
}

/// Score floor for each grade, highest first
const THRESHOLDS: [(u32, Grade); 5] = [
    (100, Grade::S),
    (90, Grade::A),
    (80, Grade::B),
    (60, Grade::C),
    (40, Grade::D),
];

impl Grade {
    pub fn from_score(score: u32) -> Self {
        THRESHOLDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::E)
    }

    pub fn title(self) -> &'static str {
        match self {
            Grade::S => "Legendary Wordsmith",
            Grade::A => "Master Linguist",
            Grade::B => "Skilled Player",
            Grade::C => "Word Enthusiast",
            Grade::D => "Learning the Ropes",
            Grade::E => "Keep Practicing!",
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" => Ok(Grade::S),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            other => Err(format!("Invalid rank grade: {}", other)),
        }
    }
}

/// Grade plus its display title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub grade: Grade,
    pub title: &'static str,
}

impl Rank {
    pub fn of(score: u32) -> Self {
        let grade = Grade::from_score(score);
        Self {
            grade,
            title: grade.title(),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.grade, self.title)
    }
}

/// Map a cumulative score to its rank band
pub fn rank_of(score: u32) -> Rank {
    Rank::of(score)
}
