//! Student onboarding pipeline
//!
//! Assessment → path planning → first-week content, strictly in order.

use super::assessment::{SkillsAssessor, SkillsReport};
use super::planner::{LearningPath, MonthPlan, PathPlanner};
use super::profile::StudentProfile;
use crate::error::{Error, Result};
use crate::llm::OllamaClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Bundle returned by onboarding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingReport {
    pub skills: SkillsReport,
    pub path: LearningPath,
    pub first_week: String,
}

/// Generates daily study plans adapted to the learning style
pub struct ContentRecommender {
    client: Arc<OllamaClient>,
}

impl ContentRecommender {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }

    pub async fn recommend(
        &self,
        month: &MonthPlan,
        learning_style: &str,
        day: u32,
    ) -> Result<String> {
        info!(day, learning_style, "generating daily study plan");
        self.client
            .complete(&format!(
                "Create today's study plan (day {}):\n\n\
                 CURRENT FOCUS: {}\n\
                 TOPICS: {}\n\
                 LEARNING STYLE: {}\n\n\
                 Recommend for today (2-hour session):\n\
                 1. Video tutorial (30-40 min) - suggest specific title/channel\n\
                 2. Reading material (20-30 min) - article or documentation\n\
                 3. Hands-on practice (60-70 min) - specific exercise or mini-project\n\n\
                 Adapt recommendations for {} learners.\n\
                 Be specific and practical.",
                day,
                month.focus,
                month.topics.join(", "),
                learning_style,
                learning_style
            ))
            .await
    }
}

/// Orchestrates the onboarding workflow
pub struct LearningPipeline {
    assessor: SkillsAssessor,
    planner: PathPlanner,
    recommender: ContentRecommender,
}

impl LearningPipeline {
    pub fn new(client: Arc<OllamaClient>) -> Self {
        Self {
            assessor: SkillsAssessor::new(),
            planner: PathPlanner::new(),
            recommender: ContentRecommender::new(client),
        }
    }

    /// Assess skills, build the roadmap, generate the day-1 study plan
    pub async fn onboard(&self, profile: &StudentProfile) -> Result<OnboardingReport> {
        profile.validate()?;
        info!(student = profile.name.as_str(), "onboarding started");

        let skills = self.assessor.assess(profile);
        info!(level = %skills.overall, "skills assessed");

        let path = self
            .planner
            .create_path(&skills, &profile.goal, profile.hours_per_week);
        info!(total_hours = path.total_hours, "learning path created");

        let first_month = path.months.first().ok_or_else(|| Error::InvalidRecord {
            kind: "learning path",
            message: "path has no months".to_string(),
        })?;
        let first_week = self
            .recommender
            .recommend(first_month, &profile.learning_style, 1)
            .await
            .map_err(|e| e.in_stage("content-recommendation"))?;

        info!(student = profile.name.as_str(), "onboarding complete");
        Ok(OnboardingReport {
            skills,
            path,
            first_week,
        })
    }
}
