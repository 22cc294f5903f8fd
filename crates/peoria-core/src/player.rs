use std::fmt;

use serde::{Deserialize, Serialize};

use crate::course::{BACK_NINE, FRONT_NINE, HOLE_COUNT};

/// Opaque player identifier. Callers keep these unique within a competition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("player-{}", uuid::Uuid::new_v4()))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A competitor and their per-hole strokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Strokes per hole; 0 means the hole has not been entered yet.
    pub scores: Vec<u32>,
    /// Only consulted to break ties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Player {
    /// A new player with a generated id and no scores entered.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::generate(),
            name: name.into(),
            scores: vec![0; HOLE_COUNT],
            age: None,
        }
    }

    /// All 18 holes entered with a positive stroke count.
    pub fn is_complete(&self) -> bool {
        self.scores.len() == HOLE_COUNT && self.scores.iter().all(|&s| s > 0)
    }

    /// Strokes over the front nine, counting what has been entered so far.
    pub fn out_total(&self) -> u64 {
        self.scores.iter().take(FRONT_NINE.end).map(|&s| u64::from(s)).sum()
    }

    /// Strokes over the back nine, counting what has been entered so far.
    pub fn in_total(&self) -> u64 {
        self.scores
            .iter()
            .skip(BACK_NINE.start)
            .take(BACK_NINE.len())
            .map(|&s| u64::from(s))
            .sum()
    }

    pub fn total(&self) -> u64 {
        self.out_total() + self.in_total()
    }

    /// Record strokes for one hole, growing a short score card if needed.
    /// Returns false for a hole past the 18th.
    pub fn set_score(&mut self, hole: usize, strokes: u32) -> bool {
        if hole >= HOLE_COUNT {
            return false;
        }
        if self.scores.len() < HOLE_COUNT {
            self.scores.resize(HOLE_COUNT, 0);
        }
        self.scores[hole] = strokes;
        true
    }
}
