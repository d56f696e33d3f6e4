//! Configuration surface for the quiz engine.
//!
//! All knobs are supplied by the embedding application; the core never
//! reads files or environment variables itself.

use crate::retry::BackoffConfig;
use serde::{Deserialize, Serialize};

/// Endpoint and sampling configuration for the text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 120,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

/// Quiz-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// How many questions one quiz attempt asks for.
    pub question_count: usize,
    pub backoff: BackoffConfig,
    pub generator: GeneratorConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 5,
            backoff: BackoffConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}
