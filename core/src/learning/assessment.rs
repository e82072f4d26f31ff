//! Skills assessment
//!
//! Classifies a student's overall level from their skill ratings and
//! exposes the two canned evaluation exercises (code challenge, concept
//! quiz) as agent tools.

use super::profile::{SkillsMatrix, StudentProfile};
use crate::agent::Tool;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Overall band derived from the average skill rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Band boundaries: 0-3 beginner, 3-7 intermediate, above 7 advanced.
    /// The boundary value belongs to the lower band.
    pub fn from_average(avg: f32) -> Self {
        if avg <= 3.0 {
            SkillLevel::Beginner
        } else if avg <= 7.0 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Advanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a skills assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsReport {
    pub matrix: SkillsMatrix,
    pub overall: SkillLevel,
    pub summary: String,
}

/// Assesses a student's current skill level
#[derive(Debug, Default)]
pub struct SkillsAssessor;

impl SkillsAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Classify from the profile's own ratings, or fall back to the
    /// default matrix for profiles that arrive without one.
    pub fn assess(&self, profile: &StudentProfile) -> SkillsReport {
        match &profile.current_skills {
            Some(matrix) if !matrix.is_empty() => {
                let avg = matrix.average().unwrap_or(0.0);
                let overall = SkillLevel::from_average(avg);
                SkillsReport {
                    matrix: matrix.clone(),
                    overall,
                    summary: format!(
                        "Current skill level: {}. Ready for structured learning path.",
                        capitalize(overall.as_str())
                    ),
                }
            }
            _ => SkillsReport {
                matrix: default_matrix(),
                overall: SkillLevel::Intermediate,
                summary: "Strong programming foundation, ready for ML journey".to_string(),
            },
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Matrix used when a profile carries no ratings of its own
fn default_matrix() -> SkillsMatrix {
    [
        ("python".to_string(), 7.0),
        ("algorithms".to_string(), 6.0),
        ("data_structures".to_string(), 5.0),
        ("machine_learning".to_string(), 3.0),
        ("deep_learning".to_string(), 2.0),
        ("mathematics".to_string(), 6.0),
    ]
    .into_iter()
    .collect()
}

/// Canned coding exercise records keyed by difficulty
pub struct CodeChallengeTool;

impl CodeChallengeTool {
    pub fn new() -> Self {
        Self
    }

    fn challenge(difficulty: &str) -> serde_json::Value {
        match difficulty {
            "intermediate" => json!({
                "problem": "Implement binary search algorithm",
                "score": 65,
                "time_taken": "22 minutes",
                "feedback": "Understands concept but needs practice with edge cases"
            }),
            "advanced" => json!({
                "problem": "Design a balanced binary search tree",
                "score": 45,
                "time_taken": "35 minutes",
                "feedback": "Needs more experience with advanced data structures"
            }),
            // Unknown difficulties fall back to the beginner record
            _ => json!({
                "problem": "Find largest number in a list",
                "score": 75,
                "time_taken": "12 minutes",
                "feedback": "Good understanding of basics, familiar with list operations"
            }),
        }
    }
}

impl Default for CodeChallengeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CodeChallengeTool {
    fn name(&self) -> &str {
        "code_challenge"
    }

    fn description(&self) -> &str {
        "Run a coding challenge and report the result."
    }

    fn usage(&self) -> &str {
        "code_challenge <beginner|intermediate|advanced>"
    }

    async fn call(&self, args: &str) -> Result<String> {
        let difficulty = args.trim().trim_matches('"').to_lowercase();
        Ok(Self::challenge(&difficulty).to_string())
    }
}

/// Canned concept quiz: fixed score, topic-templated feedback
pub struct ConceptQuizTool;

impl ConceptQuizTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConceptQuizTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ConceptQuizTool {
    fn name(&self) -> &str {
        "concept_quiz"
    }

    fn description(&self) -> &str {
        "Run a concept quiz on a topic and report the result."
    }

    fn usage(&self) -> &str {
        "concept_quiz <topic>"
    }

    async fn call(&self, args: &str) -> Result<String> {
        let topic = args.trim().trim_matches('"');
        Ok(json!({
            "topic": topic,
            "score": 80,
            "questions": 10,
            "correct": 8,
            "strengths": [format!("Strong grasp of {topic} fundamentals")],
            "weaknesses": [format!("Needs work on advanced {topic} applications")]
        })
        .to_string())
    }
}
