//! Admission processing pipeline
//!
//! Sequential multi-agent flow: document processing → eligibility
//! evaluation → applicant notification. Each agent is a thin struct
//! over the shared model client; the orchestrator runs them strictly
//! in order and aborts on the first stage failure.

use super::application::{Application, Documents};
use super::catalog::{FaqSearchTool, ProgramInfoTool, ADMISSIONS_CONTACT};
use crate::agent::{Agent, ConversationMemory, Tool};
use crate::error::Result;
use crate::extract::json_block;
use crate::llm::OllamaClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Structured output of document processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedData {
    /// Model response for the transcript extraction prompt
    pub transcript: String,
    /// Three-bullet recommendation summary
    pub recommendation: String,
    /// Model response for the essay analysis prompt
    pub essay: String,
}

/// Parsed eligibility decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// Evaluation result: the parsed decision when the model produced valid
/// JSON, plus the raw text either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub decision: Option<EligibilityDecision>,
    pub raw: String,
}

/// Notification record (the email is rendered, never sent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub sent: bool,
    pub to: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// Result of the full pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationOutcome {
    pub status: String,
    pub extracted: ExtractedData,
    pub evaluation: Evaluation,
    pub notification: Notification,
}

/// Admission criteria the evaluator judges against
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityCriteria {
    pub min_gpa: f32,
    pub required_subjects: Vec<&'static str>,
    pub min_essay_score: u32,
}

impl Default for EligibilityCriteria {
    fn default() -> Self {
        Self {
            min_gpa: 3.0,
            required_subjects: vec!["Math", "Physics"],
            min_essay_score: 6,
        }
    }
}

/// Agent 1: answers applicant questions using the lookup tools
pub struct QueryHandler {
    agent: Agent,
}

impl QueryHandler {
    pub fn new(client: Arc<OllamaClient>, max_iterations: usize) -> Self {
        let agent = Agent::new(
            client,
            vec![
                Box::new(FaqSearchTool::new()) as Box<dyn Tool>,
                Box::new(ProgramInfoTool::new()),
            ],
            format!(
                "You are an admissions assistant for a university. Answer applicant \
                 questions using the faq_search and program_info tools. If neither tool \
                 has the answer, refer the applicant to {}.",
                ADMISSIONS_CONTACT
            ),
            max_iterations,
        );
        Self { agent }
    }

    /// Answer one applicant query (no cross-query memory)
    pub async fn handle(&self, query: &str) -> Result<String> {
        let mut memory = ConversationMemory::new();
        Ok(self.agent.run(query, &mut memory).await?.content)
    }
}

/// Agent 2: extracts structured information from application documents
pub struct DocumentProcessor {
    client: Arc<OllamaClient>,
}

impl DocumentProcessor {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }

    pub async fn extract(&self, documents: &Documents) -> Result<ExtractedData> {
        info!("processing transcript");
        let transcript = self
            .client
            .complete(&format!(
                "Extract this information from the transcript:\n\
                 - GPA (numeric value)\n\
                 - Subjects studied (list)\n\
                 - Graduation year\n\n\
                 Transcript:\n{}\n\n\
                 Return ONLY valid JSON: {{\"gpa\": X.X, \"subjects\": [...], \"graduation_year\": YYYY}}",
                documents.transcript
            ))
            .await?;

        info!("summarizing recommendation");
        let recommendation = self
            .client
            .complete(&format!(
                "Summarize this recommendation in 3 bullet points:\n\n{}\n\n\
                 Format as:\n- Point 1\n- Point 2\n- Point 3",
                documents.recommendation
            ))
            .await?;

        info!("analyzing essay");
        let essay = self
            .client
            .complete(&format!(
                "Analyze this essay and return JSON:\n\nEssay:\n{}\n\n\
                 Return: {{\"main_themes\": [\"theme1\", \"theme2\"], \"writing_quality\": X, \"authenticity\": X}}\n\
                 Scores are 1-10.",
                documents.essay
            ))
            .await?;

        Ok(ExtractedData {
            transcript,
            recommendation,
            essay,
        })
    }
}

/// Agent 3: judges eligibility against the fixed criteria
pub struct EligibilityEvaluator {
    client: Arc<OllamaClient>,
    criteria: EligibilityCriteria,
}

impl EligibilityEvaluator {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self {
            client,
            criteria: EligibilityCriteria::default(),
        }
    }

    pub fn criteria(&self) -> &EligibilityCriteria {
        &self.criteria
    }

    pub async fn evaluate(&self, extracted: &ExtractedData) -> Result<Evaluation> {
        let criteria = serde_json::to_string_pretty(&self.criteria).unwrap_or_default();
        let student = serde_json::to_string_pretty(extracted).unwrap_or_default();

        let raw = self
            .client
            .complete(&format!(
                "Evaluate student eligibility:\n\n\
                 CRITERIA:\n{}\n\n\
                 STUDENT DATA:\n{}\n\n\
                 Determine:\n\
                 1. Eligible? (true/false)\n\
                 2. Score (0-100)\n\
                 3. Strengths (list 2-3)\n\
                 4. Weaknesses (if any)\n\
                 5. Reasoning (2 sentences)\n\n\
                 Return valid JSON with keys: eligible, score, strengths, weaknesses, reasoning",
                criteria, student
            ))
            .await?;

        // Local models do not always manage valid JSON; keep the raw
        // text so the notification stage still has something to say.
        let decision = json_block::<EligibilityDecision>(&raw).ok();
        Ok(Evaluation { decision, raw })
    }
}

/// Agent 4: renders the applicant-facing notification email
pub struct CommunicationManager {
    client: Arc<OllamaClient>,
}

impl CommunicationManager {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }

    pub async fn notify(&self, email: &str, evaluation: &Evaluation) -> Result<Notification> {
        info!(to = email, "rendering notification email");
        let content = self
            .client
            .complete(&format!(
                "Write a professional admission email:\n\n\
                 DECISION:\n{}\n\n\
                 Requirements:\n\
                 - Professional but warm tone\n\
                 - Clear decision statement\n\
                 - If accepted: Congratulate + next steps\n\
                 - If not: Encourage + suggest alternatives\n\
                 - Include: {} for questions\n\n\
                 Write the complete email:",
                evaluation.raw, ADMISSIONS_CONTACT
            ))
            .await?;

        Ok(Notification {
            id: Uuid::new_v4(),
            sent: true,
            to: email.to_string(),
            timestamp: Utc::now(),
            content,
        })
    }
}

/// Orchestrator running the three stages strictly in order
pub struct AdmissionPipeline {
    processor: DocumentProcessor,
    evaluator: EligibilityEvaluator,
    communicator: CommunicationManager,
}

impl AdmissionPipeline {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self {
            processor: DocumentProcessor::new(client.clone()),
            evaluator: EligibilityEvaluator::new(client.clone()),
            communicator: CommunicationManager::new(client),
        }
    }

    /// Document processing → eligibility evaluation → notification
    pub async fn process(&self, application: &Application) -> Result<ApplicationOutcome> {
        info!(email = application.email.as_str(), "application pipeline started");

        let extracted = self
            .processor
            .extract(&application.documents)
            .await
            .map_err(|e| e.in_stage("document-processing"))?;

        let evaluation = self
            .evaluator
            .evaluate(&extracted)
            .await
            .map_err(|e| e.in_stage("eligibility-evaluation"))?;

        let notification = self
            .communicator
            .notify(&application.email, &evaluation)
            .await
            .map_err(|e| e.in_stage("communication"))?;

        info!(email = application.email.as_str(), "application pipeline complete");

        Ok(ApplicationOutcome {
            status: "processed".to_string(),
            extracted,
            evaluation,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_match_the_admissions_policy() {
        let criteria = EligibilityCriteria::default();
        assert_eq!(criteria.min_gpa, 3.0);
        assert_eq!(criteria.required_subjects, vec!["Math", "Physics"]);
        assert_eq!(criteria.min_essay_score, 6);
    }

    #[test]
    fn decision_parsing_tolerates_prose_and_missing_fields() {
        let raw = "Based on the data:\n\
                   {\"eligible\": true, \"score\": 82, \"strengths\": [\"strong GPA\"], \"reasoning\": \"Meets all criteria.\"}";
        let decision: EligibilityDecision = json_block(raw).unwrap();
        assert!(decision.eligible);
        assert_eq!(decision.score, 82);
        assert_eq!(decision.strengths, vec!["strong GPA"]);
        assert!(decision.weaknesses.is_empty());
    }
}
