//! Prompt construction for the generation endpoint.
//!
//! The endpoint is a free-text generator with no native structured-output
//! guarantee, so the expected JSON shape is spelled out inside the
//! instruction text. All structural enforcement happens downstream in the
//! pipeline; these builders are pure formatting with no I/O.

/// Shape block embedded verbatim in the questions prompt.
const QUESTIONS_SHAPE: &str = r#"{
  "questions": [
    {
      "id": "q1",
      "question": "The question text",
      "options": ["first option", "second option", "third option", "fourth option"],
      "correctAnswer": 0
    }
  ]
}"#;

/// Build the instruction for generating `count` questions about `topic`.
pub fn build_questions_prompt(topic: &str, count: usize) -> String {
    format!(
        "Generate exactly {count} multiple-choice quiz questions about \"{topic}\".\n\n\
         Respond with ONLY a JSON object in exactly this shape, with no text before or after it:\n\
         {QUESTIONS_SHAPE}\n\n\
         Rules:\n\
         - \"questions\" contains exactly {count} entries\n\
         - every \"options\" array has exactly 4 strings\n\
         - \"correctAnswer\" is an integer from 0 to 3, the index of the right option\n\
         - \"id\" is a short string, unique per question\n\
         - no markdown fences, no commentary, no surrounding prose"
    )
}

/// Build the instruction for a post-quiz feedback message.
///
/// An improvement suggestion is requested only below 80 percent.
pub fn build_feedback_prompt(
    topic: &str,
    score_percent: u8,
    correct_count: usize,
    total_count: usize,
) -> String {
    let coaching = if score_percent < 80 {
        "Include one concrete suggestion for getting better at this topic."
    } else {
        "Congratulate them on a strong result."
    };

    format!(
        "A quiz taker just finished a {total_count}-question quiz about \"{topic}\", \
         answering {correct_count} correctly for a score of {score_percent}%.\n\n\
         Write an encouraging feedback message of 2-3 sentences. {coaching} \
         Do not use emojis.\n\
         Respond with ONLY a JSON object of this shape and nothing else:\n\
         {{\"message\": \"your feedback here\"}}"
    )
}
