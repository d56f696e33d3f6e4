//! Domain entities for one quiz attempt.
//!
//! Everything here is a plain value type. Questions are built by the
//! pipeline from a validated generation payload and never mutated after
//! that; results are computed once at finalization.

use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Index into `options`, always in `0..OPTIONS_PER_QUESTION`.
    pub correct_index: usize,
}

impl Question {
    pub fn is_correct(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index
    }
}

/// Ordered questions comprising one quiz attempt.
pub type QuestionSet = Vec<Question>;

/// The answer a user gave to one question. Overwritable until the session
/// is finalized, frozen history afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswer {
    pub question_id: String,
    pub selected_index: usize,
    pub is_correct: bool,
}

/// Immutable outcome of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub total_questions: usize,
    pub correct_count: usize,
    /// Rounded to the nearest whole percent.
    pub score_percent: u8,
    /// In question order; unanswered questions are absent.
    pub answers: Vec<UserAnswer>,
}

impl QuizResult {
    /// `round(correct / total * 100)`, 0 for an empty quiz.
    pub fn compute_score_percent(correct_count: usize, total_questions: usize) -> u8 {
        if total_questions == 0 {
            return 0;
        }
        ((correct_count as f64 / total_questions as f64) * 100.0).round() as u8
    }
}

/// Model-written feedback shown on the results screen. Ephemeral; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub text: String,
}
