//! Application records and loaders
//!
//! An application is an email plus three raw document texts. It can be
//! loaded from a single JSON object, from a keyed collection of
//! applications, or assembled from three plain-text files.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw document bundle submitted with an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Documents {
    pub transcript: String,
    pub recommendation: String,
    pub essay: String,
}

/// A submitted application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub email: String,
    pub documents: Documents,
}

impl Application {
    /// Presence checks the loaders run after parsing
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::InvalidRecord {
                kind: "application",
                message: "email is empty".to_string(),
            });
        }
        if self.documents.transcript.trim().is_empty() {
            return Err(Error::InvalidRecord {
                kind: "application",
                message: "transcript document is empty".to_string(),
            });
        }
        Ok(())
    }
}

fn read_json_value(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::MalformedJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single application from a JSON file.
///
/// The file may hold either one application object or a keyed
/// collection; for a collection, `key` selects the entry.
pub fn load_application(path: &Path, key: Option<&str>) -> Result<Application> {
    let value = read_json_value(path)?;

    // A single application carries an "email" field at the top level
    if value.get("email").is_some() {
        let app: Application =
            serde_json::from_value(value).map_err(|e| Error::MalformedJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        app.validate()?;
        return Ok(app);
    }

    let collection = load_collection(path, value)?;
    match key {
        Some(key) => collection
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UnknownEntry {
                key: key.to_string(),
                path: path.to_path_buf(),
            }),
        None => Err(Error::InvalidRecord {
            kind: "application",
            message: format!(
                "file holds a collection; pick one of: {}",
                collection.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        }),
    }
}

/// Load a keyed collection of applications from a JSON file
pub fn load_application_set(path: &Path) -> Result<BTreeMap<String, Application>> {
    let value = read_json_value(path)?;
    load_collection(path, value)
}

fn load_collection(
    path: &Path,
    value: serde_json::Value,
) -> Result<BTreeMap<String, Application>> {
    let collection: BTreeMap<String, Application> =
        serde_json::from_value(value).map_err(|e| Error::MalformedJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for app in collection.values() {
        app.validate()?;
    }
    Ok(collection)
}

/// Assemble an application from three plain-text document files
pub fn load_application_from_files(
    email: &str,
    transcript: &Path,
    recommendation: &Path,
    essay: &Path,
) -> Result<Application> {
    let read = |path: &Path| -> Result<String> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(fs::read_to_string(path)?)
    };

    let app = Application {
        email: email.to_string(),
        documents: Documents {
            transcript: read(transcript)?,
            recommendation: read(recommendation)?,
            essay: read(essay)?,
        },
    };
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn loads_a_single_application() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "app.json",
            r#"{
                "email": "sarah.johnson@email.com",
                "documents": {
                    "transcript": "GPA 3.9, Math, Physics, CS. Graduated 2025.",
                    "recommendation": "Sarah is exceptional.",
                    "essay": "I love building things."
                }
            }"#,
        );

        let app = load_application(&path, None).unwrap();
        assert_eq!(app.email, "sarah.johnson@email.com");
        assert!(app.documents.transcript.contains("GPA 3.9"));
    }

    #[test]
    fn loads_an_entry_from_a_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "apps.json",
            r#"{
                "strong": {
                    "email": "a@example.com",
                    "documents": {"transcript": "GPA 3.9", "recommendation": "r", "essay": "e"}
                },
                "borderline": {
                    "email": "b@example.com",
                    "documents": {"transcript": "GPA 3.0", "recommendation": "r", "essay": "e"}
                }
            }"#,
        );

        let app = load_application(&path, Some("borderline")).unwrap();
        assert_eq!(app.email, "b@example.com");

        let err = load_application(&path, Some("missing")).unwrap_err();
        assert!(matches!(err, Error::UnknownEntry { .. }));

        let err = load_application(&path, None).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn missing_file_and_malformed_json_are_distinct_errors() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_application(&dir.path().join("nope.json"), None).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let path = write_file(dir.path(), "bad.json", "{not json,");
        let err = load_application(&path, None).unwrap_err();
        assert!(matches!(err, Error::MalformedJson { .. }));
    }

    #[test]
    fn empty_email_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "app.json",
            r#"{"email": " ", "documents": {"transcript": "t", "recommendation": "r", "essay": "e"}}"#,
        );
        let err = load_application(&path, None).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { .. }));
    }

    #[test]
    fn assembles_from_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let t = write_file(dir.path(), "t.txt", "GPA 3.5, Math, Physics");
        let r = write_file(dir.path(), "r.txt", "Solid student");
        let e = write_file(dir.path(), "e.txt", "My journey");

        let app = load_application_from_files("x@example.com", &t, &r, &e).unwrap();
        assert_eq!(app.documents.recommendation, "Solid student");

        let err =
            load_application_from_files("x@example.com", &dir.path().join("gone.txt"), &r, &e)
                .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
