use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-tier difficulty label derived from total preparation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Classify a recipe by `prep + cook` minutes.
    ///
    /// Over an hour is `Hard`, over half an hour is `Medium`, anything else
    /// (including exactly 30) is `Easy`.
    pub fn classify(prep_minutes: u32, cook_minutes: u32) -> Self {
        Self::from_total(prep_minutes.saturating_add(cook_minutes))
    }

    pub fn from_total(total_minutes: u32) -> Self {
        if total_minutes > 60 {
            Difficulty::Hard
        } else if total_minutes > 30 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
