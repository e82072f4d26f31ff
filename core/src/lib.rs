pub mod admissions;
pub mod agent;
pub mod config;
pub mod error;
pub mod extract;
pub mod learning;
pub mod llm;
pub mod output;
pub mod retry;
pub mod verify;

// Re-exports for convenience
pub use agent::{Agent, AgentReply, ConversationMemory, Tool};
pub use config::Config;
pub use error::{Error, Result};
pub use llm::{OllamaClient, OllamaConfig};
