//! Progress tracking and plan adaptation
//!
//! Completion records are kept per student and persisted as JSON in the
//! data directory so tracking survives across invocations.

use super::planner::LearningPath;
use crate::error::{Error, Result};
use crate::llm::OllamaClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const PROGRESS_FILE: &str = "progress.json";

/// One completed learning activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedItem {
    pub name: String,
    #[serde(default)]
    pub score: Option<u32>,
    pub completed_at: DateTime<Utc>,
}

impl CompletedItem {
    pub fn new(name: impl Into<String>, score: Option<u32>) -> Self {
        Self {
            name: name.into(),
            score,
            completed_at: Utc::now(),
        }
    }
}

/// Model verdict on a student's pace, parsed from free text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvaluation {
    pub raw: String,
    pub status: Option<PaceStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    Ahead,
    OnTrack,
    Behind,
    Struggling,
}

impl PaceStatus {
    /// The model is prompted for one of four status words; sniff the
    /// first that appears. "struggling" beats "behind" so a response
    /// naming both resolves to the stronger signal.
    fn sniff(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("struggling") {
            Some(PaceStatus::Struggling)
        } else if lower.contains("behind") {
            Some(PaceStatus::Behind)
        } else if lower.contains("ahead") {
            Some(PaceStatus::Ahead)
        } else if lower.contains("on_track") || lower.contains("on track") {
            Some(PaceStatus::OnTrack)
        } else {
            None
        }
    }
}

/// Per-student completion log
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgressLog {
    students: BTreeMap<String, Vec<CompletedItem>>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the log from `data_dir`, starting empty when no file exists
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(PROGRESS_FILE);
        let mut log = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|e| Error::MalformedJson {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            Self::new()
        };
        log.path = Some(path);
        Ok(log)
    }

    pub fn track(&mut self, student_id: &str, item: CompletedItem) {
        info!(student_id, item = item.name.as_str(), "tracking completion");
        self.students
            .entry(student_id.to_string())
            .or_default()
            .push(item);
    }

    pub fn completed(&self, student_id: &str) -> &[CompletedItem] {
        self.students
            .get(student_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(self).map_err(|e| Error::MalformedJson {
                path: path.clone(),
                message: e.to_string(),
            })?;
            std::fs::write(path, raw)?;
        }
        Ok(())
    }
}

/// Evaluates pace against the plan and adapts it
pub struct ProgressMonitor {
    client: Arc<OllamaClient>,
}

impl ProgressMonitor {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }

    /// Ask the model whether the student is on track for the given month
    pub async fn evaluate(
        &self,
        log: &ProgressLog,
        student_id: &str,
        plan: &LearningPath,
        current_month: u32,
    ) -> Result<ProgressEvaluation> {
        let month = plan.month(current_month).ok_or_else(|| Error::InvalidRecord {
            kind: "learning path",
            message: format!("no month {current_month} in a {}-month plan", plan.duration_months),
        })?;

        let completed = serde_json::to_string_pretty(log.completed(student_id))
            .unwrap_or_else(|_| "[]".to_string());

        let raw = self
            .client
            .complete(&format!(
                "Evaluate student progress:\n\n\
                 ORIGINAL PLAN (Month {}):\n\
                 Focus: {}\n\
                 Expected: {}\n\
                 Milestone: {}\n\n\
                 COMPLETED SO FAR:\n{}\n\n\
                 Determine:\n\
                 1. Status: ahead/on_track/behind/struggling\n\
                 2. Should adjust plan: yes/no\n\
                 3. Feedback message (encouraging)\n\
                 4. Recommendations for next steps\n\n\
                 Return as JSON.",
                current_month,
                month.focus,
                month.topics.join(", "),
                month.milestone,
                completed
            ))
            .await?;

        let status = PaceStatus::sniff(&raw);
        Ok(ProgressEvaluation { raw, status })
    }

    /// Adjust the plan in response to an evaluation. Pace changes are
    /// logged but the curriculum itself is left intact.
    pub fn adapt(&self, plan: &LearningPath, evaluation: &ProgressEvaluation) -> LearningPath {
        match evaluation.status {
            Some(PaceStatus::Behind) | Some(PaceStatus::Struggling) => {
                info!("pace adjustment: simplifying pace");
            }
            Some(PaceStatus::Ahead) => {
                info!("pace adjustment: adding advanced content");
            }
            _ => {}
        }
        plan.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_appends_per_student() {
        let mut log = ProgressLog::new();
        log.track("priya_001", CompletedItem::new("OOP Module", Some(90)));
        log.track("priya_001", CompletedItem::new("NumPy Project", Some(85)));
        log.track("amir_002", CompletedItem::new("Git basics", None));

        assert_eq!(log.completed("priya_001").len(), 2);
        assert_eq!(log.completed("amir_002").len(), 1);
        assert!(log.completed("unknown").is_empty());
    }

    #[test]
    fn status_sniffing_prefers_the_stronger_signal() {
        assert_eq!(
            PaceStatus::sniff("status: behind, possibly struggling"),
            Some(PaceStatus::Struggling)
        );
        assert_eq!(PaceStatus::sniff("She is ahead of plan"), Some(PaceStatus::Ahead));
        assert_eq!(PaceStatus::sniff("\"status\": \"on_track\""), Some(PaceStatus::OnTrack));
        assert_eq!(PaceStatus::sniff("no verdict here"), None);
    }

    #[test]
    fn log_round_trips_through_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ProgressLog::open(dir.path()).unwrap();
        log.track("s1", CompletedItem::new("Pandas Practice", Some(88)));
        log.save().unwrap();

        let reloaded = ProgressLog::open(dir.path()).unwrap();
        assert_eq!(reloaded.completed("s1").len(), 1);
        assert_eq!(reloaded.completed("s1")[0].name, "Pandas Practice");
    }

    #[test]
    fn corrupt_log_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROGRESS_FILE), "{broken").unwrap();
        let err = ProgressLog::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedJson { .. }));
    }
}
