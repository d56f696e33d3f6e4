//! Caller-owned session state for one quiz attempt.
//!
//! The embedding UI owns a [`QuizSession`] value and threads it through its
//! screens. Every transition consumes the old value and returns the new
//! one, so there is no ambient shared state to guard and the transition
//! semantics stay explicit: set topic, set questions, record answer,
//! finalize, reset.

use crate::models::{QuestionSet, QuizResult, UserAnswer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSession {
    pub topic: Option<String>,
    pub questions: QuestionSet,
    answers: Vec<UserAnswer>,
    pub reviewing: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh attempt on `topic`. Prior questions and answers are
    /// discarded, never merged.
    pub fn with_topic(self, topic: &str) -> Self {
        Self {
            topic: Some(topic.to_string()),
            ..Self::default()
        }
    }

    pub fn with_questions(mut self, questions: QuestionSet) -> Self {
        self.questions = questions;
        self.answers.clear();
        self
    }

    pub fn with_reviewing(mut self, reviewing: bool) -> Self {
        self.reviewing = reviewing;
        self
    }

    /// Record the answer for `question_id`, overwriting any earlier answer
    /// to the same question. An id not present in the question set leaves
    /// the session unchanged.
    pub fn record_answer(mut self, question_id: &str, selected_index: usize) -> Self {
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            return self;
        };

        let answer = UserAnswer {
            question_id: question_id.to_string(),
            selected_index,
            is_correct: question.is_correct(selected_index),
        };

        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
        self
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&UserAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Freeze the attempt into an immutable [`QuizResult`]. Answers come
    /// out in question order; unanswered questions are absent and count as
    /// incorrect toward the score.
    pub fn finalize(&self) -> QuizResult {
        let answers: Vec<UserAnswer> = self
            .questions
            .iter()
            .filter_map(|q| self.answer_for(&q.id).cloned())
            .collect();

        let correct_count = answers.iter().filter(|a| a.is_correct).count();
        let total_questions = self.questions.len();

        QuizResult {
            total_questions,
            correct_count,
            score_percent: QuizResult::compute_score_percent(correct_count, total_questions),
            answers,
        }
    }

    /// Discard everything and return to the initial state.
    pub fn reset(self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn question(id: &str, correct_index: usize) -> Question {
        Question {
            id: id.to_string(),
            text: format!("question {id}"),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
        }
    }

    fn session_with_three_questions() -> QuizSession {
        QuizSession::new()
            .with_topic("Science")
            .with_questions(vec![question("q1", 0), question("q2", 1), question("q3", 2)])
    }

    #[test]
    fn record_answer_scores_against_question() {
        let session = session_with_three_questions()
            .record_answer("q1", 0)
            .record_answer("q2", 3);

        assert!(session.answer_for("q1").unwrap().is_correct);
        assert!(!session.answer_for("q2").unwrap().is_correct);
        assert_eq!(session.answered_count(), 2);
    }

    #[test]
    fn record_answer_overwrites_earlier_answer() {
        let session = session_with_three_questions()
            .record_answer("q1", 3)
            .record_answer("q1", 0);

        assert_eq!(session.answered_count(), 1);
        let answer = session.answer_for("q1").unwrap();
        assert_eq!(answer.selected_index, 0);
        assert!(answer.is_correct);
    }

    #[test]
    fn unknown_question_id_is_ignored() {
        let session = session_with_three_questions().record_answer("q9", 0);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn finalize_orders_answers_and_scores() {
        // Answer out of order; q3 left unanswered
        let session = session_with_three_questions()
            .record_answer("q2", 1)
            .record_answer("q1", 2);

        let result = session.finalize();
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.score_percent, 33);
        assert_eq!(result.answers.len(), 2);
        assert_eq!(result.answers[0].question_id, "q1");
        assert_eq!(result.answers[1].question_id, "q2");
    }

    #[test]
    fn new_topic_discards_previous_attempt() {
        let session = session_with_three_questions()
            .record_answer("q1", 0)
            .with_topic("History");

        assert_eq!(session.topic.as_deref(), Some("History"));
        assert!(session.questions.is_empty());
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let session = session_with_three_questions()
            .record_answer("q1", 0)
            .with_reviewing(true)
            .reset();

        assert!(session.topic.is_none());
        assert!(session.questions.is_empty());
        assert!(!session.reviewing);
    }
}
