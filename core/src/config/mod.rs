//! Configuration management
//!
//! YAML configuration with full defaults, so the kit works out of the
//! box against a stock local Ollama install. Overrides live at
//! `~/.config/eduagent/eduagent.yaml`.

use crate::error::{Error, Result};
use crate::llm::OllamaConfig;
use crate::retry::RetryConfig;
use dirs::{config_dir, data_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "eduagent.yaml";

/// Default config directory name
const CONFIG_DIR_NAME: &str = "eduagent";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Ollama connection settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Agent behavior settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Web search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Directory for persisted state (conversation memory, progress log).
    /// Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum reasoning iterations before the loop aborts
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    5
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

/// Web search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether the web search tool is registered at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Retry attempts against the search provider
    #[serde(default = "default_search_attempts")]
    pub max_attempts: u32,
    /// Seconds to wait before the first retry (doubles each attempt)
    #[serde(default = "default_search_delay_secs")]
    pub base_delay_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_search_attempts() -> u32 {
    3
}

fn default_search_delay_secs() -> u64 {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: default_search_attempts(),
            base_delay_secs: default_search_delay_secs(),
        }
    }
}

impl SearchConfig {
    /// Backoff policy for the search provider
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_secs(self.base_delay_secs),
            ..RetryConfig::default()
        }
    }
}

impl Config {
    /// Load configuration from the standard location, with defaults when
    /// no file exists.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        serde_yml::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Directory for persisted state, created on demand
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => data_dir()
                .ok_or_else(|| Error::Config {
                    message: "could not determine platform data directory".to_string(),
                })?
                .join(CONFIG_DIR_NAME),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Standard config file location, if a config dir exists on this platform
pub fn find_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.ollama.model, "llama3.2");
        assert_eq!(config.agent.max_iterations, 5);
        assert!(config.search.enabled);
        assert_eq!(config.search.max_attempts, 3);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ollama:\n  model: mistral").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.agent.max_iterations, 5);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ollama: [not a map").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn search_retry_config_doubles_from_base() {
        let config = SearchConfig::default().retry_config();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
    }
}
