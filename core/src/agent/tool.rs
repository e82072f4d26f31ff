use crate::error::Result;
use async_trait::async_trait;

/// A trait for tools that can be executed by the agent.
///
/// Tools are the only way the agent reaches outside the conversation.
/// Implementations must be `Send + Sync` so they can be shared across
/// the async loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name of the tool (e.g., "calculator")
    fn name(&self) -> &str;

    /// A brief description of what the tool does
    fn description(&self) -> &str;

    /// A description of how to use the tool, including input format
    fn usage(&self) -> &str;

    /// Execute the tool with the provided input
    async fn call(&self, args: &str) -> Result<String>;
}
