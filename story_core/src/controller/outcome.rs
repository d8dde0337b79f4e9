//! Choice outcomes and the reading-session record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one reading of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The approach a choice represents, by position on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Cautious,
    Active,
    Creative,
    Default,
}

impl OutcomeKind {
    pub fn points(&self) -> u32 {
        match self {
            OutcomeKind::Cautious => 10,
            OutcomeKind::Active => 15,
            OutcomeKind::Creative => 20,
            OutcomeKind::Default => 5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutcomeKind::Cautious => "You chose the cautious approach!",
            OutcomeKind::Active => "You took action!",
            OutcomeKind::Creative => "Creative thinking!",
            OutcomeKind::Default => "Good choice!",
        }
    }
}

/// Result of picking a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub kind: OutcomeKind,
    pub points: u32,
}

impl ChoiceOutcome {
    /// Resolve a choice index: 0 cautious, 1 active, 2 creative, anything else default.
    pub fn resolve(index: usize) -> Self {
        let kind = match index {
            0 => OutcomeKind::Cautious,
            1 => OutcomeKind::Active,
            2 => OutcomeKind::Creative,
            _ => OutcomeKind::Default,
        };
        Self {
            kind,
            points: kind.points(),
        }
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

/// A choice made during a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub page: usize,
    pub choice: usize,
    pub outcome: ChoiceOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_mapping() {
        let cases = [
            (0, OutcomeKind::Cautious, 10),
            (1, OutcomeKind::Active, 15),
            (2, OutcomeKind::Creative, 20),
            (3, OutcomeKind::Default, 5),
            (7, OutcomeKind::Default, 5),
        ];
        for (index, kind, points) in cases {
            let outcome = ChoiceOutcome::resolve(index);
            assert_eq!(outcome.kind, kind);
            assert_eq!(outcome.points, points);
        }
        assert_eq!(ChoiceOutcome::resolve(1).description(), "You took action!");
    }
}
