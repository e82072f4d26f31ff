//! LLM client module
//!
//! Interfaces for the locally hosted Ollama model the workshop kit
//! runs against. Everything upstream treats the server as an opaque
//! HTTP collaborator.

pub mod chat;
pub mod client;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, MessageRole, TokenUsage};
pub use client::OllamaClient;

use serde::{Deserialize, Serialize};

/// Ollama connection and sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Server base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for sampling (clamped to 0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,
    /// Maximum tokens in a response (`num_predict`)
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_temperature() -> Option<f32> {
    Some(0.7)
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OllamaConfig {
    /// Set temperature, clamped to the valid range
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_llama() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.temperature, Some(0.7));
    }

    #[test]
    fn temperature_clamping() {
        let config = OllamaConfig::default().with_temperature(3.0);
        assert_eq!(config.temperature, Some(2.0));
    }
}
