//! Web search tool
//!
//! Queries the DuckDuckGo Instant Answer API. The provider rate-limits
//! aggressively, so the call runs under the backoff policy; when the
//! attempt budget is spent on rate limits the tool returns a
//! user-facing advisory string instead of an error, so the agent can
//! route around it (e.g., try wikipedia instead).

use crate::agent::tool::Tool;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::retry::retry_async;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;
use tracing::warn;

const FALLBACK_MESSAGE: &str = "Web search is temporarily unavailable due to rate limits. \
     Try the wikipedia tool instead, or try again in a few moments.";

/// Search tool backed by the DuckDuckGo Instant Answer API
pub struct WebSearchTool {
    config: SearchConfig,
    http_client: HttpClient,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_endpoint(config, "https://api.duckduckgo.com".to_string())
    }

    /// Endpoint override for tests
    pub fn with_endpoint(config: SearchConfig, endpoint: String) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            config,
            http_client,
            endpoint,
        })
    }

    async fn query_provider(&self, query: &str) -> Result<String> {
        let url = format!(
            "{}/?q={}&format=json&no_html=1&skip_disambig=1",
            self.endpoint,
            urlencoding::encode(query)
        );

        let response = self.http_client.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(Error::RateLimited {
                    message: "search provider rate limit".to_string(),
                })
            }
            status => {
                return Err(Error::ServerError {
                    status: status.as_u16(),
                    message: "search provider error".to_string(),
                })
            }
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| Error::MalformedResponse {
                message: e.to_string(),
            })?;
        Ok(extract_results(&body))
    }
}

/// Pull a readable answer out of the Instant Answer JSON
fn extract_results(body: &serde_json::Value) -> String {
    if let Some(abstract_text) = body.get("AbstractText").and_then(|v| v.as_str()) {
        if !abstract_text.is_empty() {
            let source = body.get("AbstractURL").and_then(|v| v.as_str()).unwrap_or("");
            return if source.is_empty() {
                abstract_text.to_string()
            } else {
                format!("{}\nSource: {}", abstract_text, source)
            };
        }
    }

    // No abstract; fall back to related-topic snippets
    let mut results = Vec::new();
    if let Some(topics) = body.get("RelatedTopics").and_then(|v| v.as_array()) {
        for topic in topics.iter().take(5) {
            if let Some(text) = topic.get("Text").and_then(|v| v.as_str()) {
                results.push(format!("- {}", text));
            }
        }
    }

    if results.is_empty() {
        "No results found.".to_string()
    } else {
        results.join("\n")
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "A search engine. Useful for questions about current events, facts, or general knowledge."
    }

    fn usage(&self) -> &str {
        "Provide a search query. Example: 'latest AI developments 2025'."
    }

    async fn call(&self, args: &str) -> Result<String> {
        if !self.config.enabled {
            return Err(Error::ToolFailed {
                tool_name: "web_search".to_string(),
                message: "web search is disabled in configuration".to_string(),
            });
        }

        let retry = self.config.retry_config();
        match retry_async(&retry, || self.query_provider(args)).await {
            Ok(results) => Ok(results),
            Err(e) if e.is_retryable() => {
                // Budget spent on transient failures; degrade gracefully
                warn!(error = %e, "search attempts exhausted, returning fallback");
                Ok(FALLBACK_MESSAGE.to_string())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_abstract_text_with_source() {
        let body = json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            "RelatedTopics": []
        });
        let out = extract_results(&body);
        assert!(out.starts_with("Rust is a systems programming language."));
        assert!(out.contains("Source: https://en.wikipedia.org"));
    }

    #[test]
    fn falls_back_to_related_topics() {
        let body = json!({
            "AbstractText": "",
            "RelatedTopics": [
                {"Text": "First topic"},
                {"Text": "Second topic"},
                {"NoText": true}
            ]
        });
        let out = extract_results(&body);
        assert_eq!(out, "- First topic\n- Second topic");
    }

    #[test]
    fn empty_body_reports_no_results() {
        assert_eq!(extract_results(&json!({})), "No results found.");
    }

    #[tokio::test]
    async fn disabled_search_is_a_tool_error() {
        let config = SearchConfig {
            enabled: false,
            ..SearchConfig::default()
        };
        let tool = WebSearchTool::new(config).unwrap();
        let err = tool.call("anything").await.unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }
}
