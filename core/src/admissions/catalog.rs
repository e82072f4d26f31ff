//! Static admissions knowledge
//!
//! The FAQ answers and program records the query-handler agent draws
//! on. In production these would sit behind a real datastore; the
//! workshop kit ships them as fixed tables.

use crate::agent::tool::Tool;
use crate::error::Result;
use async_trait::async_trait;

/// Contact address returned when the FAQ has no answer
pub const ADMISSIONS_CONTACT: &str = "admissions@university.edu";

/// Fixed FAQ answers keyed by topic
pub struct FaqDatabase {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for FaqDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl FaqDatabase {
    pub fn new() -> Self {
        Self {
            entries: vec![
                ("deadline", "Application deadline is November 30th, 2025"),
                ("fee", "Application fee is $50 (waiver available)"),
                (
                    "documents",
                    "Required: Transcripts, ID, 2 recommendation letters, essay",
                ),
                ("gpa", "Minimum GPA: 3.0 on 4.0 scale"),
                ("programs", "BS in CS, EE, ME available"),
                ("housing", "On-campus housing available, apply separately"),
                (
                    "scholarships",
                    "Merit scholarships up to $5,000/year available",
                ),
            ],
        }
    }

    /// Topics available for display
    pub fn topics(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    /// First entry whose key appears in the lowercased query
    pub fn lookup(&self, query: &str) -> Option<&'static str> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| query.contains(key))
            .map(|(_, answer)| *answer)
    }
}

/// One degree program record
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub duration: &'static str,
    pub fee: &'static str,
    pub requirements: &'static str,
    pub career: &'static str,
}

/// The three degree programs the workshop system knows about
pub struct ProgramCatalog {
    programs: Vec<ProgramInfo>,
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramCatalog {
    pub fn new() -> Self {
        Self {
            programs: vec![
                ProgramInfo {
                    code: "CS",
                    name: "Computer Science",
                    duration: "4 years",
                    fee: "$10,000/year",
                    requirements: "Strong math, Physics/CS background",
                    career: "Software Engineer, Data Scientist, AI Researcher",
                },
                ProgramInfo {
                    code: "EE",
                    name: "Electrical Engineering",
                    duration: "4 years",
                    fee: "$10,000/year",
                    requirements: "Math, Physics background",
                    career: "Electronics Engineer, Power Systems Engineer",
                },
                ProgramInfo {
                    code: "ME",
                    name: "Mechanical Engineering",
                    duration: "4 years",
                    fee: "$9,500/year",
                    requirements: "Math, Physics background",
                    career: "Mechanical Designer, Robotics Engineer",
                },
            ],
        }
    }

    /// Program by code, case-insensitive
    pub fn get(&self, code: &str) -> Option<&ProgramInfo> {
        let code = code.trim().to_uppercase();
        self.programs.iter().find(|p| p.code == code)
    }

    pub fn all(&self) -> &[ProgramInfo] {
        &self.programs
    }
}

impl std::fmt::Display for ProgramInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} Program", self.name)?;
        writeln!(f, "  Duration: {}", self.duration)?;
        writeln!(f, "  Fee: {}", self.fee)?;
        writeln!(f, "  Requirements: {}", self.requirements)?;
        write!(f, "  Career paths: {}", self.career)
    }
}

/// FAQ lookup exposed to the query-handler agent
pub struct FaqSearchTool {
    db: FaqDatabase,
}

impl FaqSearchTool {
    pub fn new() -> Self {
        Self {
            db: FaqDatabase::new(),
        }
    }
}

impl Default for FaqSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FaqSearchTool {
    fn name(&self) -> &str {
        "faq_search"
    }

    fn description(&self) -> &str {
        "Search the admissions FAQ database for deadlines, fees, requirements, housing, and scholarships."
    }

    fn usage(&self) -> &str {
        "Provide a keyword or question, e.g. 'deadline' or 'what is the application fee?'."
    }

    async fn call(&self, args: &str) -> Result<String> {
        Ok(match self.db.lookup(args) {
            Some(answer) => answer.to_string(),
            None => format!("For this query, please contact {}", ADMISSIONS_CONTACT),
        })
    }
}

/// Program detail lookup exposed to the query-handler agent
pub struct ProgramInfoTool {
    catalog: ProgramCatalog,
}

impl ProgramInfoTool {
    pub fn new() -> Self {
        Self {
            catalog: ProgramCatalog::new(),
        }
    }
}

impl Default for ProgramInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ProgramInfoTool {
    fn name(&self) -> &str {
        "program_info"
    }

    fn description(&self) -> &str {
        "Get details about a degree program."
    }

    fn usage(&self) -> &str {
        "Provide the program code: 'CS', 'EE', or 'ME'."
    }

    async fn call(&self, args: &str) -> Result<String> {
        Ok(match self.catalog.get(args) {
            Some(program) => program.to_string(),
            None => "Program not found".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_matches_keys_inside_queries() {
        let db = FaqDatabase::new();
        assert_eq!(
            db.lookup("What is the application deadline?"),
            Some("Application deadline is November 30th, 2025")
        );
        assert_eq!(
            db.lookup("Do you offer SCHOLARSHIPS?"),
            Some("Merit scholarships up to $5,000/year available")
        );
    }

    #[test]
    fn faq_miss_refers_to_admissions() {
        let db = FaqDatabase::new();
        assert_eq!(db.lookup("parking permits"), None);
    }

    #[test]
    fn faq_covers_the_full_topic_set() {
        let db = FaqDatabase::new();
        assert_eq!(
            db.topics(),
            vec![
                "deadline",
                "fee",
                "documents",
                "gpa",
                "programs",
                "housing",
                "scholarships"
            ]
        );
    }

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        let catalog = ProgramCatalog::new();
        assert_eq!(catalog.get("cs").unwrap().name, "Computer Science");
        assert_eq!(catalog.get("Ee").unwrap().name, "Electrical Engineering");
        assert_eq!(catalog.get("ME").unwrap().fee, "$9,500/year");
        assert!(catalog.get("BIO").is_none());
    }

    #[tokio::test]
    async fn tools_render_hits_and_misses() {
        let faq = FaqSearchTool::new();
        let hit = faq.call("housing options?").await.unwrap();
        assert!(hit.contains("On-campus housing"));
        let miss = faq.call("cafeteria menu").await.unwrap();
        assert!(miss.contains(ADMISSIONS_CONTACT));

        let programs = ProgramInfoTool::new();
        let cs = programs.call("CS").await.unwrap();
        assert!(cs.contains("Computer Science Program"));
        assert_eq!(programs.call("XX").await.unwrap(), "Program not found");
    }
}
