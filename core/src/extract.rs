//! Parsing structured data out of model text
//!
//! Local models wrap JSON in prose ("Sure! Here is the JSON you asked
//! for: …"). The convention throughout the pipelines: take the slice
//! from the first `{` to the last `}` and parse that.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Extract and parse the first-to-last-brace JSON object in model text.
pub fn json_block<T: DeserializeOwned>(text: &str) -> Result<T> {
    let start = text.find('{');
    let end = text.rfind('}');

    let snippet = || text.chars().take(60).collect::<String>();

    match (start, end) {
        (Some(start), Some(end)) if end > start => {
            serde_json::from_str(&text[start..=end]).map_err(|_| Error::MissingJsonBlock {
                snippet: snippet(),
            })
        }
        _ => Err(Error::MissingJsonBlock { snippet: snippet() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Decision {
        eligible: bool,
        score: u32,
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let text = "Here is my evaluation:\n{\"eligible\": true, \"score\": 85}\nGood luck!";
        let decision: Decision = json_block(text).unwrap();
        assert_eq!(
            decision,
            Decision {
                eligible: true,
                score: 85
            }
        );
    }

    #[test]
    fn takes_outermost_braces() {
        // A stray brace after the object widens the slice past valid JSON
        let text = "{\"eligible\": false, \"score\": 40} stray } here";
        let result: Result<Decision> = json_block(text);
        assert!(result.is_err());

        let text = "prefix {\"eligible\": false, \"score\": 40}";
        let decision: Decision = json_block(text).unwrap();
        assert!(!decision.eligible);
    }

    #[test]
    fn missing_block_is_a_typed_error() {
        let result: Result<Decision> = json_block("I could not produce JSON, sorry.");
        match result {
            Err(Error::MissingJsonBlock { snippet }) => {
                assert!(snippet.starts_with("I could not"));
            }
            other => panic!("expected MissingJsonBlock, got {:?}", other),
        }
    }

    #[test]
    fn malformed_block_is_a_typed_error() {
        let result: Result<Decision> = json_block("{\"eligible\": tru}");
        assert!(matches!(result, Err(Error::MissingJsonBlock { .. })));
    }
}
