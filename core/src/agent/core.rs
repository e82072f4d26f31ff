//! Agent core implementation
//!
//! A ReAct (Reason + Act) loop: the model is prompted with the tool
//! roster and a strict Thought/Action/Observation protocol, and the
//! loop executes tool calls until the model produces a final answer or
//! a safety limit trips.

use crate::agent::memory::ConversationMemory;
use crate::agent::tool::Tool;
use crate::error::{Error, Result};
use crate::llm::{ChatMessage, ChatRequest, OllamaClient, TokenUsage};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// One parsed model turn in the ReAct protocol
#[derive(Debug, Clone, PartialEq)]
pub enum ReactStep {
    /// The model wants to execute a tool
    Action {
        /// Reasoning text preceding the action, if any
        thought: Option<String>,
        tool: String,
        input: String,
    },
    /// The model produced its final answer
    Final(String),
    /// Plain text with no protocol markers; treated as the final answer
    Message(String),
}

/// Parse a raw model turn into a [`ReactStep`].
///
/// `Final Answer:` wins over `Action:` when both appear, matching the
/// convention that a model emitting both has finished reasoning.
pub fn parse_react(content: &str) -> ReactStep {
    let content = content.trim();

    if let Some(pos) = content.find("Final Answer:") {
        let answer = content[pos + "Final Answer:".len()..].trim();
        return ReactStep::Final(answer.to_string());
    }

    let action = find_marker(content, "Action:");
    let input = find_marker(content, "Action Input:");

    if let (Some((action_pos, tool)), Some((_, input))) = (action, input) {
        // The tool name line may run into "Action Input:" when the model
        // skips the newline; cut it off.
        let tool = tool
            .split("Action Input:")
            .next()
            .unwrap_or(&tool)
            .trim()
            .to_string();
        let thought = content[..action_pos].trim();
        let thought = thought
            .strip_prefix("Thought:")
            .unwrap_or(thought)
            .trim()
            .to_string();
        return ReactStep::Action {
            thought: if thought.is_empty() { None } else { Some(thought) },
            tool,
            input,
        };
    }

    ReactStep::Message(content.to_string())
}

/// Position and first-line value of a `Marker: value` occurrence
fn find_marker(content: &str, marker: &str) -> Option<(usize, String)> {
    let pos = content.find(marker)?;
    let rest = &content[pos + marker.len()..];
    let value = rest.lines().next().unwrap_or("").trim().to_string();
    Some((pos, value))
}

/// The final result of an agent run
#[derive(Debug, Clone)]
pub struct AgentReply {
    /// Final answer text
    pub content: String,
    /// Accumulated token usage across all iterations
    pub usage: TokenUsage,
    /// Number of model calls made
    pub iterations: usize,
}

/// The core agent driving the ReAct loop
pub struct Agent {
    client: Arc<OllamaClient>,
    tools: HashMap<String, Box<dyn Tool>>,
    max_iterations: usize,
    system_prompt_prefix: String,
}

impl Agent {
    /// Create a new agent with the provided client and tool roster
    pub fn new(
        client: Arc<OllamaClient>,
        tools: Vec<Box<dyn Tool>>,
        system_prompt_prefix: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        let mut tool_map = HashMap::new();
        for tool in tools {
            tool_map.insert(tool.name().to_string(), tool);
        }

        Self {
            client,
            tools: tool_map,
            max_iterations,
            system_prompt_prefix: system_prompt_prefix.into(),
        }
    }

    /// Names of the registered tools
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Run the loop for one user input, reading from and appending to
    /// the conversation memory.
    pub async fn run(&self, input: &str, memory: &mut ConversationMemory) -> Result<AgentReply> {
        let mut history = vec![ChatMessage::system(self.system_prompt())];
        history.extend_from_slice(memory.messages());
        history.push(ChatMessage::user(input));

        let mut total_usage = TokenUsage::default();
        let mut last_tool_call: Option<(String, String)> = None;
        let mut repetition_count = 0usize;

        for iteration in 1..=self.max_iterations {
            let request = ChatRequest::new(history.clone())
                .with_stop(vec!["Observation:".to_string(), "\nObservation".to_string()]);
            let response = self.client.chat(&request).await?;
            if let Some(usage) = &response.usage {
                total_usage.add(usage);
            }

            let content = response.content().to_string();

            match parse_react(&content) {
                ReactStep::Final(answer) | ReactStep::Message(answer) => {
                    info!(iterations = iteration, "agent reached final answer");
                    memory.record_user(input);
                    memory.record_assistant(&answer);
                    return Ok(AgentReply {
                        content: answer,
                        usage: total_usage,
                        iterations: iteration,
                    });
                }
                ReactStep::Action { thought, tool, input: args } => {
                    if let Some(thought) = &thought {
                        debug!(%tool, thought, "agent step");
                    }

                    // Guard against the model looping on one call
                    if let Some((last_tool, last_args)) = &last_tool_call {
                        if *last_tool == tool && *last_args == args {
                            repetition_count += 1;
                            if repetition_count >= 3 {
                                return Err(Error::RepeatedToolCall { tool_name: tool });
                            }
                        } else {
                            repetition_count = 0;
                        }
                    }
                    last_tool_call = Some((tool.clone(), args.clone()));

                    let observation = match self.tools.get(&tool) {
                        Some(t) => match t.call(&args).await {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        },
                        None => format!("Error: tool '{}' not found.", tool),
                    };
                    debug!(%tool, observation = observation.as_str(), "tool result");

                    history.push(ChatMessage::assistant(content));
                    history.push(ChatMessage::user(format!("Observation: {}", observation)));
                }
            }
        }

        Err(Error::IterationLimit {
            max_iterations: self.max_iterations,
        })
    }

    /// Full system prompt: caller prefix plus the ReAct protocol and
    /// tool roster.
    pub fn system_prompt(&self) -> String {
        let mut tools_desc = String::new();
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort_unstable();
        for name in &names {
            let tool = &self.tools[*name];
            tools_desc.push_str(&format!(
                "- {}: {}\n  Usage: {}\n",
                tool.name(),
                tool.description(),
                tool.usage()
            ));
        }

        format!(
            "{}\n\n\
            # Operational Protocol (ReAct)\n\
            You have access to the following tools:\n\n\
            {}\n\
            Use the following format:\n\n\
            Question: the input question you must answer\n\
            Thought: you should always think about what to do\n\
            Action: the action to take, must be one of [{}]\n\
            Action Input: the input to the action\n\
            Observation: the result of the action (STOP after Action Input and wait for this)\n\
            ... (Thought/Action/Action Input/Observation can repeat)\n\
            Thought: I now know the final answer\n\
            Final Answer: the final answer to the original question\n\n\
            For personal facts and anything already in the conversation, answer from \
            memory without tools. Do not hallucinate Observations.\n\n\
            Begin!",
            self.system_prompt_prefix,
            tools_desc,
            names
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_action_with_thought() {
        let content = "Thought: I need to calculate this.\nAction: calculator\nAction Input: 25 * 67";
        let step = parse_react(content);
        assert_eq!(
            step,
            ReactStep::Action {
                thought: Some("I need to calculate this.".to_string()),
                tool: "calculator".to_string(),
                input: "25 * 67".to_string(),
            }
        );
    }

    #[test]
    fn parses_action_without_thought() {
        let step = parse_react("Action: web_search\nAction Input: latest AI news");
        match step {
            ReactStep::Action { thought, tool, input } => {
                assert_eq!(thought, None);
                assert_eq!(tool, "web_search");
                assert_eq!(input, "latest AI news");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn final_answer_wins_over_action() {
        let content =
            "Action: calculator\nAction Input: 1+1\nThought: done\nFinal Answer: The result is 2.";
        assert_eq!(
            parse_react(content),
            ReactStep::Final("The result is 2.".to_string())
        );
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse_react("Nice to meet you, Sarah!"),
            ReactStep::Message("Nice to meet you, Sarah!".to_string())
        );
    }

    #[test]
    fn empty_output_is_an_empty_message() {
        assert_eq!(parse_react("   "), ReactStep::Message(String::new()));
    }

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes its input."
        }
        fn usage(&self) -> &str {
            "Provide any text."
        }
        async fn call(&self, args: &str) -> Result<String> {
            Ok(args.to_string())
        }
    }

    #[test]
    fn system_prompt_lists_tools() {
        let client = Arc::new(
            OllamaClient::new(crate::llm::OllamaConfig::default()).unwrap(),
        );
        let agent = Agent::new(client, vec![Box::new(EchoTool)], "You are a tutor.", 5);

        let prompt = agent.system_prompt();
        assert!(prompt.starts_with("You are a tutor."));
        assert!(prompt.contains("- echo: Echoes its input."));
        assert!(prompt.contains("must be one of [echo]"));
        assert_eq!(agent.tool_names(), vec!["echo"]);
    }
}
