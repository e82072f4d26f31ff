//! Structured error types for eduagent
//!
//! One taxonomy for the whole workspace: provider failures, tool
//! failures, document/profile loading, and configuration problems.
//! The binary wraps these with `anyhow` context at the edge.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for eduagent operations
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Model / API Errors
    // =========================================================================
    /// The Ollama server could not be reached at all
    #[error("model server unreachable at {base_url}: {message}")]
    ServerUnreachable { base_url: String, message: String },

    /// The configured model is not installed on the server (404)
    #[error("model '{model}' not found on server (try `ollama pull {model}`)")]
    ModelNotFound { model: String },

    /// Rate limit exceeded (429)
    #[error("rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// The server answered with a non-success status
    #[error("model server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The response body did not match the expected wire format
    #[error("malformed model response: {message}")]
    MalformedResponse { message: String },

    // =========================================================================
    // Agent / Tool Errors
    // =========================================================================
    /// Tool referenced by the model does not exist
    #[error("tool not found: {tool_name}")]
    ToolNotFound { tool_name: String },

    /// Tool execution failed
    #[error("tool '{tool_name}' failed: {message}")]
    ToolFailed { tool_name: String, message: String },

    /// The agent hit its hard iteration cap
    #[error("maximum iteration limit ({max_iterations}) reached, task aborted")]
    IterationLimit { max_iterations: usize },

    /// The agent kept issuing the same tool call
    #[error("repeated tool call to '{tool_name}' with identical arguments, breaking loop")]
    RepeatedToolCall { tool_name: String },

    // =========================================================================
    // Pipeline Errors
    // =========================================================================
    /// A pipeline stage failed; names the stage for diagnostics
    #[error("pipeline stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Model output was expected to contain a JSON object but none parsed
    #[error("no JSON object found in model output (starts with: {snippet:?})")]
    MissingJsonBlock { snippet: String },

    // =========================================================================
    // Loading Errors
    // =========================================================================
    /// Input file does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file exists but is not valid JSON
    #[error("invalid JSON in {path}: {message}")]
    MalformedJson { path: PathBuf, message: String },

    /// A loaded record is missing required fields
    #[error("invalid {kind}: {message}")]
    InvalidRecord { kind: &'static str, message: String },

    /// Selection key not present in a loaded collection
    #[error("no entry '{key}' in {path}")]
    UnknownEntry { key: String, path: PathBuf },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file could not be read or parsed
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Catch-all for I/O around the data directory
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error with the pipeline stage it occurred in.
    pub fn in_stage(self, stage: &'static str) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Whether a retry has any chance of succeeding.
    ///
    /// Rate limits, 5xx responses, and transport failures are transient;
    /// everything else (missing model, bad input, parse failures) is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited { .. } => true,
            Error::ServerUnreachable { .. } => true,
            Error::ServerError { status, .. } => *status >= 500,
            Error::ToolFailed { message, .. } => {
                let msg = message.to_lowercase();
                msg.contains("rate") || msg.contains("429") || msg.contains("timeout")
            }
            _ => false,
        }
    }
}

/// Convenience alias used throughout the core crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            Error::ServerUnreachable {
                base_url: e
                    .url()
                    .map(|u| u.as_str().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                message: e.to_string(),
            }
        } else if e.is_decode() {
            Error::MalformedResponse {
                message: e.to_string(),
            }
        } else {
            Error::ServerError {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_and_server_errors_are_retryable() {
        assert!(Error::RateLimited {
            message: "slow down".into()
        }
        .is_retryable());
        assert!(Error::ServerError {
            status: 503,
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(Error::ServerUnreachable {
            base_url: "http://localhost:11434".into(),
            message: "connection refused".into()
        }
        .is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!Error::ModelNotFound {
            model: "llama3.2".into()
        }
        .is_retryable());
        assert!(!Error::ServerError {
            status: 400,
            message: "bad request".into()
        }
        .is_retryable());
        assert!(!Error::MissingJsonBlock {
            snippet: "Sure, here is".into()
        }
        .is_retryable());
    }

    #[test]
    fn tool_failures_use_message_sniffing() {
        assert!(Error::ToolFailed {
            tool_name: "web_search".into(),
            message: "Ratelimit exceeded".into()
        }
        .is_retryable());
        assert!(!Error::ToolFailed {
            tool_name: "calculator".into(),
            message: "invalid expression".into()
        }
        .is_retryable());
    }

    #[test]
    fn stage_wrapping_names_the_stage() {
        let err = Error::ModelNotFound {
            model: "llama3.2".into(),
        }
        .in_stage("document-processing");
        assert!(err.to_string().contains("document-processing"));
    }
}
