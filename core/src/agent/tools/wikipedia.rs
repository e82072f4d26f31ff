//! Wikipedia lookup tool
//!
//! Two MediaWiki API calls: a title search, then an intro extract for
//! the best match. Extracts are truncated so a verbose article does not
//! flood the agent's context.

use crate::agent::tool::Tool;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

const MAX_EXTRACT_CHARS: usize = 1500;

/// Encyclopedia lookup backed by the MediaWiki API
pub struct WikipediaTool {
    http_client: HttpClient,
    endpoint: String,
}

impl WikipediaTool {
    pub fn new() -> Result<Self> {
        Self::with_endpoint("https://en.wikipedia.org/w/api.php".to_string())
    }

    /// Endpoint override for tests
    pub fn with_endpoint(endpoint: String) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    async fn get_json(&self, query_params: &str) -> Result<serde_json::Value> {
        let url = format!("{}?{}&format=json", self.endpoint, query_params);
        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::ServerError {
                status: response.status().as_u16(),
                message: "wikipedia API error".to_string(),
            });
        }
        response.json().await.map_err(|e| Error::MalformedResponse {
            message: e.to_string(),
        })
    }

    /// Title of the best search match, if any
    async fn search_title(&self, query: &str) -> Result<Option<String>> {
        let body = self
            .get_json(&format!(
                "action=query&list=search&srlimit=1&srsearch={}",
                urlencoding::encode(query)
            ))
            .await?;

        Ok(body
            .pointer("/query/search/0/title")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    /// Plain-text intro extract for an exact title
    async fn fetch_extract(&self, title: &str) -> Result<Option<String>> {
        let body = self
            .get_json(&format!(
                "action=query&prop=extracts&exintro=1&explaintext=1&redirects=1&titles={}",
                urlencoding::encode(title)
            ))
            .await?;

        let pages = match body.pointer("/query/pages").and_then(|v| v.as_object()) {
            Some(pages) => pages,
            None => return Ok(None),
        };
        Ok(pages
            .values()
            .next()
            .and_then(|page| page.get("extract"))
            .and_then(|v| v.as_str())
            .map(|s| truncate_extract(s, MAX_EXTRACT_CHARS)))
    }
}

/// Truncate at a char boundary and mark the cut
fn truncate_extract(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Look up historical facts and encyclopedia knowledge on Wikipedia."
    }

    fn usage(&self) -> &str {
        "Provide a topic or question. Example: 'transformer architecture' or 'history of artificial intelligence'."
    }

    async fn call(&self, args: &str) -> Result<String> {
        let title = match self.search_title(args).await? {
            Some(title) => title,
            None => return Ok(format!("No Wikipedia page found for '{}'.", args)),
        };

        match self.fetch_extract(&title).await? {
            Some(extract) if !extract.is_empty() => Ok(format!("{}\n\n{}", title, extract)),
            _ => Ok(format!("Page '{}' exists but has no readable summary.", title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_extracts_pass_through() {
        assert_eq!(truncate_extract("short text", 100), "short text");
    }

    #[test]
    fn long_extracts_are_cut_with_ellipsis() {
        let long = "a".repeat(2000);
        let out = truncate_extract(&long, 1500);
        assert_eq!(out.chars().count(), 1501);
        assert!(out.ends_with('…'));
    }
}
