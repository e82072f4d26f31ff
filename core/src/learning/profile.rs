//! Student profiles and their JSON loaders

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Named numeric skill ratings on a 0-10 scale.
///
/// Ratings are clamped on construction so a hand-edited profile with an
/// out-of-range value cannot skew the level classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillsMatrix(BTreeMap<String, f32>);

// Deserialization goes through `set` so file-sourced ratings are
// clamped like every other construction path.
impl<'de> Deserialize<'de> for SkillsMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, f32>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl SkillsMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, skill: impl Into<String>, rating: f32) {
        self.0.insert(skill.into(), rating.clamp(0.0, 10.0));
    }

    pub fn get(&self, skill: &str) -> Option<f32> {
        self.0.get(skill).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Mean rating, or None for an empty matrix
    pub fn average(&self) -> Option<f32> {
        if self.0.is_empty() {
            return None;
        }
        let sum: f32 = self.0.values().sum();
        Some(sum / self.0.len() as f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f32)> for SkillsMatrix {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (skill, rating) in iter {
            matrix.set(skill, rating);
        }
        matrix
    }
}

/// A student being onboarded onto a learning path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub current_role: String,
    pub goal: String,
    pub hours_per_week: u32,
    #[serde(default = "default_learning_style")]
    pub learning_style: String,
    #[serde(default)]
    pub current_skills: Option<SkillsMatrix>,
}

fn default_learning_style() -> String {
    "hands-on".to_string()
}

impl StudentProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord {
                kind: "student profile",
                message: "name must not be empty".to_string(),
            });
        }
        if self.goal.trim().is_empty() {
            return Err(Error::InvalidRecord {
                kind: "student profile",
                message: "goal must not be empty".to_string(),
            });
        }
        if self.hours_per_week == 0 {
            return Err(Error::InvalidRecord {
                kind: "student profile",
                message: "hours_per_week must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load a student profile from a JSON file
pub fn load_student_profile(path: impl AsRef<Path>) -> Result<StudentProfile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    let profile: StudentProfile =
        serde_json::from_str(&raw).map_err(|e| Error::MalformedJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn matrix_clamps_ratings_into_range() {
        let mut matrix = SkillsMatrix::new();
        matrix.set("python", 14.0);
        matrix.set("sql", -2.0);
        assert_eq!(matrix.get("python"), Some(10.0));
        assert_eq!(matrix.get("sql"), Some(0.0));
    }

    #[test]
    fn deserialized_ratings_are_clamped() {
        let matrix: SkillsMatrix =
            serde_json::from_str(r#"{"python": 14.0, "sql": -2.0}"#).unwrap();
        assert_eq!(matrix.get("python"), Some(10.0));
        assert_eq!(matrix.get("sql"), Some(0.0));
    }

    #[test]
    fn empty_matrix_has_no_average() {
        assert_eq!(SkillsMatrix::new().average(), None);
    }

    #[test]
    fn average_is_the_mean_of_ratings() {
        let matrix: SkillsMatrix =
            [("a".to_string(), 4.0), ("b".to_string(), 6.0)].into_iter().collect();
        assert_eq!(matrix.average(), Some(5.0));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = load_student_profile("/no/such/profile.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_student_profile(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedJson { .. }));
    }

    #[test]
    fn load_rejects_profile_without_goal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "Sam", "goal": "", "hours_per_week": 10}}"#
        )
        .unwrap();
        let err = load_student_profile(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn load_fills_optional_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "Sam", "goal": "Become Machine Learning Engineer", "hours_per_week": 10}}"#
        )
        .unwrap();
        let profile = load_student_profile(file.path()).unwrap();
        assert_eq!(profile.learning_style, "hands-on");
        assert!(profile.current_skills.is_none());
    }
}
