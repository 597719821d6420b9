//! HTTP generation client with bounded timeout and retry logic.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{Generated, GenerationError, GenerationRequest, GenerationService, TokenUsage};
use crate::config::GenerationConfig;
use crate::error::{Error, Result};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Wire request for the messages endpoint.
#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<Content>,
    model: String,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Content {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: usize,
    output_tokens: usize,
}

/// Generation client over the messages API with retry on transient failures.
pub struct HttpGenerationClient {
    client: Client,
    api_key: String,
    model: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl HttpGenerationClient {
    /// Build a client from configuration. Fails when no API key is
    /// configured; callers treat that as "service not available" and plan
    /// with fallback templates only.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("no generation API key configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn make_request(
        &self,
        request: &WireRequest,
    ) -> std::result::Result<Generated, GenerationError> {
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Unavailable(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::OK => {
                let wire: WireResponse = response
                    .json()
                    .await
                    .map_err(|e| GenerationError::Malformed(e.to_string()))?;

                Ok(Generated {
                    text: wire
                        .content
                        .first()
                        .map(|c| c.text.clone())
                        .unwrap_or_default(),
                    usage: TokenUsage {
                        input_tokens: wire.usage.input_tokens,
                        output_tokens: wire.usage.output_tokens,
                    },
                    model: wire.model,
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(GenerationError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GenerationError::Auth),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GenerationError::Unavailable(format!("{status}: {body}")))
            }
        }
    }

    fn is_retryable(error: &GenerationError) -> bool {
        matches!(
            error,
            GenerationError::Timeout | GenerationError::RateLimited
        )
    }

    fn backoff(&self, retry_count: u32) -> u64 {
        self.retry_delay_ms * 2u64.pow(retry_count - 1)
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generated, GenerationError> {
        let wire = WireRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: 0.7,
        };

        let mut retry_count = 0;
        loop {
            match self.make_request(&wire).await {
                Ok(generated) => {
                    debug!(
                        model = %generated.model,
                        tokens = generated.usage.total(),
                        "generation call succeeded"
                    );
                    return Ok(generated);
                }
                Err(e) => {
                    if retry_count >= self.max_retries || !Self::is_retryable(&e) {
                        return Err(e);
                    }

                    retry_count += 1;
                    let delay = self.backoff(retry_count);
                    warn!(attempt = retry_count, delay_ms = delay, error = %e, "retrying generation call");
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }
}
