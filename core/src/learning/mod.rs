//! Personalized learning-path generation
//!
//! Skills assessment, curriculum planning, daily content recommendation,
//! and progress monitoring for one student at a time.

pub mod assessment;
pub mod monitor;
pub mod pipeline;
pub mod planner;
pub mod profile;

pub use assessment::{
    CodeChallengeTool, ConceptQuizTool, SkillLevel, SkillsAssessor, SkillsReport,
};
pub use monitor::{
    CompletedItem, PaceStatus, ProgressEvaluation, ProgressLog, ProgressMonitor,
};
pub use pipeline::{ContentRecommender, LearningPipeline, OnboardingReport};
pub use planner::{LearningPath, MonthPlan, PathPlanner, Track};
pub use profile::{load_student_profile, SkillsMatrix, StudentProfile};
