//! Configuration for the generation service boundary.
//!
//! Values come from an optional TOML file merged with environment
//! variables; the environment wins. Everything has a default except the API
//! key, which stays absent unless provided -- an absent key simply means
//! runs use the templated fallbacks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: usize,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: 30,
            max_tokens: 1024,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => Config::default(),
        };

        config.merge_env_vars();
        Ok(config)
    }

    fn merge_env_vars(&mut self) {
        if let Ok(key) = std::env::var("WAYFARER_API_KEY") {
            if !key.is_empty() {
                self.generation.api_key = Some(key);
            }
        } else if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                self.generation.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("WAYFARER_MODEL") {
            if !model.is_empty() {
                self.generation.model = model;
            }
        }

        if let Ok(timeout) = std::env::var("WAYFARER_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.generation.timeout_secs = secs;
            }
        }
    }
}
