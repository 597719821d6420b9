//! Text-generation service boundary.
//!
//! Itinerary assembly and alternative advice call this service at most once
//! per invocation point. Every failure mode it can produce is caught by the
//! calling stage and converted into a deterministic fallback, so the service
//! can never fail a planning run.

mod client;
mod prompt;

pub use client::HttpGenerationClient;
pub use prompt::{alternatives_prompt, itinerary_prompt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors the generation service can surface. Timeouts and rate limits are
/// transient; the client retries those itself before giving up.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation request timed out")]
    Timeout,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("authentication failed")]
    Auth,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Structured input for one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: usize,
}

/// Token counts reported by the service, tracked per run for cost
/// observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Output of a successful generation call.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub usage: TokenUsage,
    pub model: String,
}

/// External text-generation collaborator.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generated, GenerationError>;
}
