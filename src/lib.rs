//! quizgen - typed quiz content from a free-text generation endpoint.
//!
//! The hard part of an AI quiz application is not the screens, it is
//! turning an unreliable free-text model response into schema-valid domain
//! objects. This crate owns that pipeline: prompt construction, the
//! endpoint call, JSON extraction from prose-wrapped output, structural
//! validation, and bounded retry with exponential backoff. Screens and
//! routing live in the embedding application and call in through
//! [`QuizPipeline`], threading a caller-owned [`QuizSession`] between them.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod retry;
pub mod session;

pub use client::{FakeGenerator, OllamaGenerator, TextGenerator};
pub use config::{GeneratorConfig, QuizConfig};
pub use error::GenError;
pub use models::{
    FeedbackMessage, Question, QuestionSet, QuizResult, UserAnswer, OPTIONS_PER_QUESTION,
};
pub use pipeline::QuizPipeline;
pub use retry::{retry_with_backoff, BackoffConfig};
pub use session::QuizSession;
