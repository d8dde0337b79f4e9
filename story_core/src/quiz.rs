//! Quiz sessions offered after a story.

use serde::{Deserialize, Serialize};
use space_weather::{QuestionId, QuizQuestion};

use crate::error::StoryError;

/// Feedback for one answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question: QuestionId,
    pub correct: bool,
    pub correct_option: String,
    pub explanation: String,
}

/// A fixed sequence of questions answered in order.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: String,
    questions: Vec<QuizQuestion>,
    position: usize,
    correct: u32,
}

impl QuizSession {
    pub fn new(category: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            category: category.into(),
            questions,
            position: 0,
            correct: 0,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The question awaiting an answer.
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.position)
    }

    /// Answer the current question by option index and move on.
    pub fn answer(&mut self, option: usize) -> Result<QuizAnswer, StoryError> {
        let question = self.current().ok_or(StoryError::QuizFinished)?;
        if option >= question.options.len() {
            return Err(StoryError::InvalidChoice {
                index: option,
                available: question.options.len(),
            });
        }

        let correct = question.is_correct(option);
        let answer = QuizAnswer {
            question: question.id.clone(),
            correct,
            correct_option: question.correct_option().unwrap_or_default().to_string(),
            explanation: question.explanation.clone(),
        };

        if correct {
            self.correct += 1;
        }
        self.position += 1;
        Ok(answer)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.correct
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
