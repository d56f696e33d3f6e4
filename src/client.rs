//! Generation endpoint client.
//!
//! [`TextGenerator`] is the seam between the pipeline and the outside
//! world: one prompt string in, one free-text string out. Production code
//! uses [`OllamaGenerator`] against an Ollama-style HTTP endpoint; tests
//! drive the pipeline with [`FakeGenerator`] and scripted responses.

use crate::config::GeneratorConfig;
use crate::error::GenError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// One call to the generation endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

/// Fixed sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, Serialize)]
struct SamplingOptions {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client for an Ollama-style `/api/generate` endpoint.
pub struct OllamaGenerator {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl OllamaGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenError> {
        let url = format!("{}/api/generate", self.config.endpoint);

        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: SamplingOptions {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                num_predict: self.config.max_output_tokens,
            },
        };

        info!(
            "[>] generation call [{}] ({} prompt chars)",
            self.config.model,
            prompt.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenError::Transport(format!(
                        "request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    GenError::Transport(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(GenError::Transport(format!(
                "endpoint returned HTTP {}",
                response.status()
            )));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenError::Transport(format!("malformed response envelope: {e}")))?;

        debug!(
            "[<] generation response ({} chars)",
            envelope.response.len()
        );

        Ok(envelope.response)
    }
}

/// Scripted generator for tests.
///
/// Responses are handed out in order; the last one repeats once the queue
/// is down to a single entry, and every call is counted.
pub struct FakeGenerator {
    responses: Mutex<Vec<Result<String, GenError>>>,
    call_count: Mutex<usize>,
}

impl FakeGenerator {
    pub fn new(responses: Vec<Result<String, GenError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    /// A generator that returns the same text on every call.
    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// A generator that fails the same way on every call.
    pub fn always_failing(error: GenError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenError> {
        *self.call_count.lock().unwrap() += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(GenError::Transport(
                "fake generator has no scripted responses".to_string(),
            ));
        }

        if responses.len() == 1 {
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}
