//! Ollama client implementation
//!
//! Talks to a locally hosted Ollama server over its native HTTP API:
//! `/api/generate` for one-shot prompts, `/api/chat` for conversations,
//! `/api/version` and `/api/tags` for environment checks.

use super::{
    chat::{ChatRequest, ChatResponse, TokenUsage},
    OllamaConfig,
};
use crate::error::{Error, Result};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a local Ollama server
pub struct OllamaClient {
    config: OllamaConfig,
    http_client: HttpClient,
}

impl OllamaClient {
    /// Create a new client
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(OllamaClient {
            config,
            http_client,
        })
    }

    /// One-shot completion against `/api/generate`.
    ///
    /// This is what the pipeline agents use: a fixed prompt in, a block
    /// of model text out.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);

        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: ModelOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
                stop: None,
            },
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let response = self.check_status(response).await?;

        let body: GenerateResponse =
            response.json().await.map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;
        Ok(body.response)
    }

    /// Multi-turn chat against `/api/chat`
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.config.base_url);

        let body = ApiChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            stream: false,
            options: ModelOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
                stop: request.stop.clone(),
            },
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let response = self.check_status(response).await?;

        let body: ApiChatResponse =
            response.json().await.map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;

        let usage = match (body.prompt_eval_count, body.eval_count) {
            (Some(p), Some(c)) => Some(TokenUsage {
                prompt_tokens: p,
                completion_tokens: c,
                total_tokens: p + c,
            }),
            _ => None,
        };

        Ok(ChatResponse {
            content: body.message.map(|m| m.content).unwrap_or_default(),
            usage,
        })
    }

    /// Server version, used by `eduagent verify`
    pub async fn version(&self) -> Result<String> {
        let url = format!("{}/api/version", self.config.base_url);
        let response = self.http_client.get(&url).send().await?;
        let response = self.check_status(response).await?;

        let body: VersionResponse =
            response.json().await.map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;
        Ok(body.version)
    }

    /// Names of models installed on the server
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.config.base_url);
        let response = self.http_client.get(&url).send().await?;
        let response = self.check_status(response).await?;

        let body: TagsResponse =
            response.json().await.map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;
        Ok(body.models.into_iter().map(|m| m.name).collect())
    }

    /// Map non-success statuses to the error taxonomy
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(Error::ModelNotFound {
                model: self.config.model.clone(),
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                let message = Self::error_message(response).await;
                Err(Error::RateLimited { message })
            }
            status => {
                let message = Self::error_message(response).await;
                Err(Error::ServerError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Best-effort extraction of Ollama's `{"error": "..."}` body
    async fn error_message(response: reqwest::Response) -> String {
        let body: Option<serde_json::Value> = response.json().await.ok();
        body.as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string()
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// The configured server base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

// Ollama native API wire types

#[derive(Serialize)]
struct ModelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: ModelOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct ApiChatRequest<'a> {
    model: &'a str,
    messages: &'a Vec<super::chat::ChatMessage>,
    stream: bool,
    options: ModelOptions,
}

#[derive(Deserialize)]
struct ApiChatResponse {
    message: Option<ApiChatMessage>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Deserialize)]
struct ApiChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct VersionResponse {
    version: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}
