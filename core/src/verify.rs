//! Setup verification
//!
//! Runs the environment checks a fresh install needs before any agent
//! can work: config presence, Ollama reachability, model availability,
//! and a writable data directory.

use crate::config::{find_config_file, Config};
use crate::error::Result;
use crate::llm::{OllamaClient, OllamaConfig};

const PROBE_TIMEOUT_SECS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: CheckOutcome,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: CheckOutcome::Pass, detail: detail.into() }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: CheckOutcome::Warn, detail: detail.into() }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, outcome: CheckOutcome::Fail, detail: detail.into() }
    }
}

/// True when no check failed (warnings are acceptable)
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.outcome != CheckOutcome::Fail)
}

/// Run all checks in order. Later checks still run when earlier ones
/// fail so the report is complete.
pub async fn run_checks(config: &Config) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();

    results.push(check_config_file());

    // Short-timeout probe client; the configured timeout is meant for
    // generation, not liveness checks.
    let probe = OllamaClient::new(OllamaConfig {
        timeout_secs: PROBE_TIMEOUT_SECS,
        ..config.ollama.clone()
    })?;

    let server = check_server(&probe).await;
    let server_up = server.outcome == CheckOutcome::Pass;
    results.push(server);

    if server_up {
        results.push(check_model(&probe).await);
    } else {
        results.push(CheckResult::fail(
            "model",
            format!("skipped: server at {} is unreachable", config.ollama.base_url),
        ));
    }

    results.push(check_data_dir(config));

    Ok(results)
}

fn check_config_file() -> CheckResult {
    config_file_check(find_config_file())
}

fn config_file_check(path: Option<std::path::PathBuf>) -> CheckResult {
    match path {
        Some(path) if path.exists() => {
            CheckResult::pass("config", format!("found {}", path.display()))
        }
        Some(path) => CheckResult::warn(
            "config",
            format!("no config file at {}, using defaults", path.display()),
        ),
        None => CheckResult::warn("config", "no config file, using defaults"),
    }
}

async fn check_server(client: &OllamaClient) -> CheckResult {
    match client.version().await {
        Ok(version) => CheckResult::pass(
            "server",
            format!("Ollama {} at {}", version, client.base_url()),
        ),
        Err(e) => CheckResult::fail("server", e.to_string()),
    }
}

async fn check_model(client: &OllamaClient) -> CheckResult {
    let wanted = client.model();
    match client.list_models().await {
        Ok(models) => {
            // Tags report "llama3.2:latest" for a configured "llama3.2"
            let present = models
                .iter()
                .any(|m| m == wanted || m.split(':').next() == Some(wanted));
            if present {
                CheckResult::pass("model", format!("'{wanted}' is available"))
            } else {
                CheckResult::fail(
                    "model",
                    format!("'{wanted}' not found; run: ollama pull {wanted}"),
                )
            }
        }
        Err(e) => CheckResult::fail("model", e.to_string()),
    }
}

fn check_data_dir(config: &Config) -> CheckResult {
    match config.resolve_data_dir() {
        Ok(dir) => {
            let probe = dir.join(".write-probe");
            match std::fs::write(&probe, b"ok") {
                Ok(()) => {
                    let _ = std::fs::remove_file(&probe);
                    CheckResult::pass("data dir", format!("writable: {}", dir.display()))
                }
                Err(e) => CheckResult::fail(
                    "data dir",
                    format!("{} is not writable: {e}", dir.display()),
                ),
            }
        }
        Err(e) => CheckResult::fail("data dir", e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_passed_tolerates_warnings() {
        let results = vec![
            CheckResult::pass("a", ""),
            CheckResult::warn("b", ""),
        ];
        assert!(all_passed(&results));
    }

    #[test]
    fn all_passed_rejects_any_failure() {
        let results = vec![
            CheckResult::pass("a", ""),
            CheckResult::fail("b", "broken"),
        ];
        assert!(!all_passed(&results));
    }

    #[test]
    fn missing_config_file_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eduagent.yaml");

        let result = config_file_check(Some(path.clone()));
        assert_eq!(result.outcome, CheckOutcome::Warn);
        assert!(result.detail.contains("using defaults"));

        std::fs::write(&path, "agent:\n  max_iterations: 5\n").unwrap();
        let result = config_file_check(Some(path));
        assert_eq!(result.outcome, CheckOutcome::Pass);
    }

    #[test]
    fn unresolvable_config_dir_is_a_warning() {
        let result = config_file_check(None);
        assert_eq!(result.outcome, CheckOutcome::Warn);
    }
}
