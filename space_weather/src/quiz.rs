//! Quiz questions.

use serde::{Deserialize, Serialize};

/// Catalogue identifier for a quiz question (e.g. `Q001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question difficulty tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub category: String,
}

impl QuizQuestion {
    /// Check an answer by option index.
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }

    /// A question is well formed when the correct index points at an option.
    pub fn is_well_formed(&self) -> bool {
        self.correct < self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion {
            id: QuestionId("Q001".to_string()),
            question: "How long does a CME take to reach Earth?".to_string(),
            options: vec!["8 minutes".to_string(), "1-3 days".to_string()],
            correct: 1,
            explanation: "CMEs are slower than light.".to_string(),
            difficulty: Difficulty::Easy,
            category: "cme".to_string(),
        }
    }

    #[test]
    fn test_answer_checking() {
        let q = question();
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert_eq!(q.correct_option(), Some("1-3 days"));
        assert!(q.is_well_formed());
    }

    #[test]
    fn test_difficulty_serde() {
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
    }
}
