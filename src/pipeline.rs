//! Response pipeline: prompt, endpoint call, extraction, validation.
//!
//! [`QuizPipeline`] turns a free-text generation response into typed domain
//! values. Question generation wraps one attempt (call + extraction +
//! validation) in the retry loop; feedback generation is a single shot whose
//! first failure propagates so the caller can omit the feedback panel.

use crate::client::TextGenerator;
use crate::config::QuizConfig;
use crate::error::GenError;
use crate::extract::extract_json_object;
use crate::models::{FeedbackMessage, Question, QuestionSet, QuizResult, OPTIONS_PER_QUESTION};
use crate::prompts;
use crate::retry::retry_with_backoff;
use serde_json::Value;
use tracing::{info, warn};

pub struct QuizPipeline<C: TextGenerator> {
    client: C,
    config: QuizConfig,
}

impl<C: TextGenerator> QuizPipeline<C> {
    pub fn new(client: C, config: QuizConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate a question set for `topic`.
    ///
    /// Transport, extraction, and validation failures are all retried with
    /// exponential backoff; running out of attempts surfaces
    /// [`GenError::Exhausted`] carrying the last failure's message.
    pub async fn generate_questions(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<QuestionSet, GenError> {
        let prompt = prompts::build_questions_prompt(topic, count);

        let questions = retry_with_backoff(&self.config.backoff, |attempt| {
            self.attempt_questions(&prompt, count, attempt)
        })
        .await?;

        info!(
            "generated {} questions for topic '{}'",
            questions.len(),
            topic
        );
        Ok(questions)
    }

    /// One attempt: call, extract, validate. Each failure mode maps to a
    /// retryable [`GenError`].
    async fn attempt_questions(
        &self,
        prompt: &str,
        expected: usize,
        attempt: usize,
    ) -> Result<QuestionSet, GenError> {
        if attempt > 0 {
            info!("question generation attempt {}", attempt + 1);
        }
        let raw = self.client.generate(prompt).await?;
        let payload = extract_json_object(&raw)?;
        parse_question_set(&payload, expected)
    }

    /// Generate a feedback message for a finished quiz. No retry: the first
    /// failure of any kind propagates as-is.
    pub async fn generate_feedback(
        &self,
        topic: &str,
        result: &QuizResult,
    ) -> Result<FeedbackMessage, GenError> {
        let prompt = prompts::build_feedback_prompt(
            topic,
            result.score_percent,
            result.correct_count,
            result.total_questions,
        );

        let raw = self.client.generate(&prompt).await?;
        let payload = extract_json_object(&raw)?;

        let text = payload
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GenError::SchemaValidation(
                    "feedback payload has no string `message` field".to_string(),
                )
            })?;

        Ok(FeedbackMessage {
            text: text.to_string(),
        })
    }
}

/// Structural validation of the generated payload. Nothing here checks
/// whether a question is factually right, only that the shape holds.
fn parse_question_set(payload: &Value, expected: usize) -> Result<QuestionSet, GenError> {
    let items = payload
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GenError::SchemaValidation("payload has no `questions` array".to_string())
        })?;

    if items.is_empty() {
        return Err(GenError::SchemaValidation(
            "`questions` array is empty".to_string(),
        ));
    }

    let questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            parse_question(item).map_err(|e| GenError::SchemaValidation(format!("question {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // The generator sometimes ignores the requested count. Tolerated: the
    // session runs with whatever came back.
    if questions.len() != expected {
        warn!(
            "requested {} questions but generator returned {}",
            expected,
            questions.len()
        );
    }

    Ok(questions)
}

fn parse_question(item: &Value) -> Result<Question, String> {
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing string `id`".to_string())?;

    let text = item
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing string `question`".to_string())?;

    let raw_options = item
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing `options` array".to_string())?;

    if raw_options.len() != OPTIONS_PER_QUESTION {
        return Err(format!(
            "expected {} options, got {}",
            OPTIONS_PER_QUESTION,
            raw_options.len()
        ));
    }

    let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
    for (i, option) in raw_options.iter().enumerate() {
        match option.as_str() {
            Some(s) => options.push(s.to_string()),
            None => return Err(format!("option {i} is not a string")),
        }
    }
    let options: [String; OPTIONS_PER_QUESTION] = options
        .try_into()
        .map_err(|_| "wrong option count".to_string())?;

    let correct = item
        .get("correctAnswer")
        .and_then(Value::as_u64)
        .ok_or_else(|| "missing or non-integer `correctAnswer`".to_string())?
        as usize;

    if correct >= OPTIONS_PER_QUESTION {
        return Err(format!("`correctAnswer` {correct} is out of range"));
    }

    Ok(Question {
        id: id.to_string(),
        text: text.to_string(),
        options,
        correct_index: correct,
    })
}
