//! Single-agent module: ReAct loop, tool seam, conversation memory

pub mod core;
pub mod memory;
pub mod tool;
pub mod tools;

pub use core::{parse_react, Agent, AgentReply, ReactStep};
pub use memory::ConversationMemory;
pub use tool::Tool;
