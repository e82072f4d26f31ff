//! Learning path planning
//!
//! Routes a student's goal to one of three 6-month curriculum tracks
//! (machine learning, software development, data science) and scales the
//! hour budget to their weekly availability.

use super::assessment::{SkillLevel, SkillsReport};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DURATION_MONTHS: u32 = 6;

/// One month of a learning path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthPlan {
    pub month: u32,
    pub focus: String,
    pub topics: Vec<String>,
    pub prerequisites: String,
    pub hours: u32,
    pub milestone: String,
    pub skills_gained: Vec<String>,
}

/// A complete 6-month roadmap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub goal: String,
    pub duration_months: u32,
    pub hours_per_week: u32,
    pub total_hours: u32,
    pub level: SkillLevel,
    pub months: Vec<MonthPlan>,
    pub final_goal: String,
}

impl LearningPath {
    pub fn month(&self, number: u32) -> Option<&MonthPlan> {
        self.months.iter().find(|m| m.month == number)
    }
}

/// The curriculum track a goal routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    MachineLearning,
    SoftwareDevelopment,
    DataScience,
}

impl Track {
    /// Keyword routing over the goal text. Goals that match nothing
    /// default to the machine-learning track.
    pub fn for_goal(goal: &str) -> Self {
        if goal.contains("Machine Learning") || goal.contains("ML") || goal.contains("AI") {
            Track::MachineLearning
        } else if goal.contains("Software Developer") || goal.contains("Programming") {
            Track::SoftwareDevelopment
        } else if goal.contains("Data Scientist") || goal.contains("Data") {
            Track::DataScience
        } else {
            Track::MachineLearning
        }
    }
}

/// Builds personalized learning paths
#[derive(Debug, Default)]
pub struct PathPlanner;

impl PathPlanner {
    pub fn new() -> Self {
        Self
    }

    pub fn create_path(
        &self,
        report: &SkillsReport,
        goal: &str,
        hours_per_week: u32,
    ) -> LearningPath {
        let track = Track::for_goal(goal);
        debug!(?track, goal, "routing goal to curriculum track");

        let monthly_hours = hours_per_week * 4;
        let (months, final_goal) = match track {
            Track::MachineLearning => ml_track(monthly_hours),
            Track::SoftwareDevelopment => dev_track(monthly_hours),
            Track::DataScience => ds_track(monthly_hours),
        };

        LearningPath {
            goal: goal.to_string(),
            duration_months: DURATION_MONTHS,
            hours_per_week,
            total_hours: hours_per_week * 4 * DURATION_MONTHS,
            level: report.overall,
            months,
            final_goal,
        }
    }
}

fn month(
    number: u32,
    focus: &str,
    topics: [&str; 4],
    prerequisites: &str,
    hours: u32,
    milestone: &str,
    skills_gained: &[&str],
) -> MonthPlan {
    MonthPlan {
        month: number,
        focus: focus.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        prerequisites: prerequisites.to_string(),
        hours,
        milestone: milestone.to_string(),
        skills_gained: skills_gained.iter().map(|s| s.to_string()).collect(),
    }
}

fn ml_track(hours: u32) -> (Vec<MonthPlan>, String) {
    let months = vec![
        month(
            1,
            "Advanced Python + Data Libraries",
            [
                "Object-oriented programming (classes, inheritance)",
                "Decorators and generators",
                "NumPy arrays and vectorization",
                "Pandas DataFrames and data manipulation",
            ],
            "Basic Python",
            hours,
            "Complete 3 data analysis projects using real datasets",
            &["OOP", "NumPy", "Pandas"],
        ),
        month(
            2,
            "Mathematics for Machine Learning",
            [
                "Linear Algebra (vectors, matrices, eigenvalues)",
                "Calculus (derivatives, gradients, chain rule)",
                "Probability and statistics",
                "Mathematical notation in ML papers",
            ],
            "High school math",
            hours,
            "Pass math fundamentals quiz with 80%+ score",
            &["Linear Algebra", "Calculus", "Statistics"],
        ),
        month(
            3,
            "Machine Learning Fundamentals",
            [
                "Supervised learning (regression, classification)",
                "Unsupervised learning (clustering, dimensionality reduction)",
                "Scikit-learn library and pipelines",
                "Model evaluation and cross-validation",
            ],
            "Python + Math foundations",
            hours,
            "Build 2 end-to-end ML projects from scratch",
            &["Scikit-learn", "ML algorithms", "Model evaluation"],
        ),
        month(
            4,
            "Deep Learning Basics",
            [
                "Neural networks fundamentals",
                "Backpropagation and optimization",
                "PyTorch or TensorFlow",
                "CNNs for computer vision",
            ],
            "ML fundamentals",
            hours,
            "Build image classifier with 90%+ accuracy",
            &["PyTorch", "Neural Networks", "CNNs"],
        ),
        month(
            5,
            "Advanced Deep Learning",
            [
                "RNNs and LSTMs for sequences",
                "Transformers and attention mechanisms",
                "Transfer learning and fine-tuning",
                "GANs basics",
            ],
            "DL basics",
            hours,
            "Fine-tune pre-trained model for custom task",
            &["RNNs", "Transformers", "Transfer Learning"],
        ),
        month(
            6,
            "MLOps and Production Deployment",
            [
                "Model deployment with Docker",
                "FastAPI for ML APIs",
                "Model monitoring and maintenance",
                "Cloud platforms (AWS/GCP)",
            ],
            "DL proficiency",
            hours,
            "Deploy full ML system to production with monitoring",
            &["Docker", "MLOps", "Production deployment"],
        ),
    ];
    (
        months,
        "Job-ready ML Engineer with portfolio of projects".to_string(),
    )
}

fn dev_track(hours: u32) -> (Vec<MonthPlan>, String) {
    let months = vec![
        month(
            1,
            "Programming Fundamentals & Best Practices",
            [
                "Clean code principles",
                "Data structures (arrays, lists, trees, graphs)",
                "Algorithm complexity analysis",
                "Git version control mastery",
            ],
            "Basic programming knowledge",
            hours,
            "Complete 20 coding challenges on LeetCode/HackerRank",
            &["Data Structures", "Algorithms", "Git"],
        ),
        month(
            2,
            "Web Development Foundations",
            [
                "HTML5, CSS3, and responsive design",
                "JavaScript ES6+ fundamentals",
                "DOM manipulation and events",
                "REST API concepts",
            ],
            "Programming fundamentals",
            hours,
            "Build 3 interactive web applications",
            &["HTML/CSS", "JavaScript", "APIs"],
        ),
        month(
            3,
            "Backend Development",
            [
                "Node.js or Python Flask/Django",
                "Database design (SQL and NoSQL)",
                "Authentication and authorization",
                "Building RESTful APIs",
            ],
            "Web foundations",
            hours,
            "Build full-stack CRUD application with database",
            &["Backend frameworks", "Databases", "API development"],
        ),
        month(
            4,
            "Modern Frontend Frameworks",
            [
                "React.js or Vue.js fundamentals",
                "State management (Redux/Vuex)",
                "Component-based architecture",
                "Modern build tools (Webpack, Vite)",
            ],
            "JavaScript proficiency",
            hours,
            "Build SPA (Single Page Application) with modern framework",
            &["React/Vue", "State management", "Modern tooling"],
        ),
        month(
            5,
            "DevOps & Testing",
            [
                "Unit testing and integration testing",
                "CI/CD pipelines",
                "Docker containers",
                "Cloud deployment (AWS/GCP/Azure)",
            ],
            "Full-stack development skills",
            hours,
            "Deploy application with automated testing and CI/CD",
            &["Testing", "Docker", "CI/CD", "Cloud"],
        ),
        month(
            6,
            "Portfolio & Interview Preparation",
            [
                "System design basics",
                "Behavioral interview preparation",
                "Portfolio website development",
                "LeetCode medium/hard problems",
            ],
            "All previous months",
            hours,
            "Complete portfolio with 5 projects, pass 10 mock interviews",
            &["System design", "Interview skills", "Portfolio"],
        ),
    ];
    (
        months,
        "Job-ready Junior Software Developer with strong portfolio".to_string(),
    )
}

fn ds_track(hours: u32) -> (Vec<MonthPlan>, String) {
    let months = vec![
        month(
            1,
            "Python for Data Analysis",
            [
                "Python fundamentals and syntax",
                "Pandas for data manipulation",
                "Data cleaning and preprocessing",
                "Jupyter notebooks workflow",
            ],
            "Basic programming or analytical thinking",
            hours,
            "Complete 5 data cleaning and analysis projects",
            &["Python", "Pandas", "Data cleaning"],
        ),
        month(
            2,
            "Statistics & Probability",
            [
                "Descriptive and inferential statistics",
                "Probability distributions",
                "Hypothesis testing",
                "Statistical significance",
            ],
            "Basic mathematics",
            hours,
            "Complete statistical analysis on 3 real-world datasets",
            &["Statistics", "Hypothesis testing", "Data analysis"],
        ),
        month(
            3,
            "Data Visualization & Communication",
            [
                "Matplotlib and Seaborn",
                "Plotly for interactive visualizations",
                "Dashboard creation with Tableau/PowerBI",
                "Data storytelling techniques",
            ],
            "Python and statistics",
            hours,
            "Create 3 comprehensive data visualization dashboards",
            &["Data visualization", "Dashboards", "Storytelling"],
        ),
        month(
            4,
            "Machine Learning for Data Science",
            [
                "Regression and classification models",
                "Feature engineering",
                "Model selection and validation",
                "Scikit-learn for ML",
            ],
            "Statistics and Python",
            hours,
            "Build 3 predictive models with real business data",
            &["Machine learning", "Feature engineering", "Model validation"],
        ),
        month(
            5,
            "Advanced ML & Big Data",
            [
                "Ensemble methods (Random Forest, XGBoost)",
                "Time series analysis",
                "SQL for data extraction",
                "Introduction to Spark for big data",
            ],
            "ML fundamentals",
            hours,
            "Complete time series forecasting project with SQL integration",
            &["Advanced ML", "Time series", "SQL", "Big data"],
        ),
        month(
            6,
            "Portfolio & Business Skills",
            [
                "End-to-end data science project",
                "Business metrics and KPIs",
                "Communicating insights to stakeholders",
                "GitHub portfolio development",
            ],
            "All previous months",
            hours,
            "Complete capstone project with full analysis and presentation",
            &["Business acumen", "Communication", "Portfolio"],
        ),
    ];
    (
        months,
        "Job-ready Data Scientist with business-oriented portfolio".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::profile::SkillsMatrix;

    fn report() -> SkillsReport {
        SkillsReport {
            matrix: SkillsMatrix::new(),
            overall: SkillLevel::Intermediate,
            summary: String::new(),
        }
    }

    #[test]
    fn goal_keywords_route_to_the_expected_track() {
        assert_eq!(
            Track::for_goal("Become Machine Learning Engineer"),
            Track::MachineLearning
        );
        assert_eq!(Track::for_goal("Move into AI research"), Track::MachineLearning);
        assert_eq!(
            Track::for_goal("Become a Software Developer"),
            Track::SoftwareDevelopment
        );
        assert_eq!(Track::for_goal("Become a Data Scientist"), Track::DataScience);
        assert_eq!(Track::for_goal("Become an astronaut"), Track::MachineLearning);
    }

    #[test]
    fn path_scales_hours_to_availability() {
        let path = PathPlanner::new().create_path(&report(), "Become a Data Scientist", 10);
        assert_eq!(path.duration_months, 6);
        assert_eq!(path.total_hours, 240);
        assert_eq!(path.months.len(), 6);
        assert!(path.months.iter().all(|m| m.hours == 40));
    }

    #[test]
    fn every_month_has_four_topics_and_a_milestone() {
        let path =
            PathPlanner::new().create_path(&report(), "Become Machine Learning Engineer", 8);
        for m in &path.months {
            assert_eq!(m.topics.len(), 4);
            assert!(!m.milestone.is_empty());
            assert!(!m.skills_gained.is_empty());
        }
        assert_eq!(path.months[0].focus, "Advanced Python + Data Libraries");
        assert_eq!(path.months[5].focus, "MLOps and Production Deployment");
    }

    #[test]
    fn month_lookup_finds_by_number() {
        let path = PathPlanner::new().create_path(&report(), "Programming career", 5);
        assert_eq!(
            path.month(2).map(|m| m.focus.as_str()),
            Some("Web Development Foundations")
        );
        assert!(path.month(7).is_none());
    }
}
