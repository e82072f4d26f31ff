//! Conversation memory
//!
//! An ordered buffer of the conversation so far. The buffer is
//! persisted as JSON under the data directory so one-shot CLI
//! invocations share a conversation, and `memory show` can replay it.

use crate::error::{Error, Result};
use crate::llm::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MEMORY_FILE_NAME: &str = "conversation.json";

/// Buffer of prior conversation turns
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConversationMemory {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl ConversationMemory {
    /// An empty in-process buffer (used in tests and pipelines)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted buffer from the data directory, starting fresh
    /// if no file exists yet.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(MEMORY_FILE_NAME);
        let mut memory = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| Error::MalformedJson {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            Self::default()
        };
        memory.path = Some(path);
        Ok(memory)
    }

    /// Record a user turn
    pub fn record_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Record an assistant turn
    pub fn record_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// The stored conversation, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of stored turns
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Forget everything, removing the persisted file as well
    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Write the buffer back to disk (no-op for in-process buffers)
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&self).map_err(|e| Error::Config {
                message: format!("failed to serialize memory: {}", e),
            })?;
            fs::write(path, content)?;
        }
        Ok(())
    }

    /// Human-readable transcript for `memory show`
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for msg in &self.messages {
            let speaker = match msg.role {
                MessageRole::System => "System",
                MessageRole::User => "You",
                MessageRole::Assistant => "Agent",
                MessageRole::Tool => "Tool",
            };
            out.push_str(&format!("{}: {}\n", speaker, msg.content));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_turns_in_order() {
        let mut memory = ConversationMemory::new();
        memory.record_user("My name is Sarah");
        memory.record_assistant("Nice to meet you, Sarah!");

        assert_eq!(memory.len(), 2);
        let transcript = memory.transcript();
        assert!(transcript.starts_with("You: My name is Sarah\n"));
        assert!(transcript.contains("Agent: Nice to meet you"));
    }

    #[test]
    fn round_trips_through_data_dir() {
        let dir = tempfile::tempdir().unwrap();

        let mut memory = ConversationMemory::open(dir.path()).unwrap();
        assert!(memory.is_empty());
        memory.record_user("remember me");
        memory.save().unwrap();

        let reloaded = ConversationMemory::open(dir.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.messages()[0].content, "remember me");
    }

    #[test]
    fn clear_removes_the_persisted_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut memory = ConversationMemory::open(dir.path()).unwrap();
        memory.record_user("ephemeral");
        memory.save().unwrap();
        memory.clear().unwrap();

        let reloaded = ConversationMemory::open(dir.path()).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn corrupt_memory_file_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEMORY_FILE_NAME), "{not json").unwrap();

        let err = ConversationMemory::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedJson { .. }));
    }
}
