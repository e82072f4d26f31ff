//! Built-in tools for the single agent

pub mod calculator;
pub mod search;
pub mod wikipedia;

pub use calculator::CalculatorTool;
pub use search::WebSearchTool;
pub use wikipedia::WikipediaTool;

use crate::agent::tool::Tool;
use crate::config::Config;
use crate::error::Result;

/// The default roster the `ask` command runs with
pub fn default_tools(config: &Config) -> Result<Vec<Box<dyn Tool>>> {
    let mut tools: Vec<Box<dyn Tool>> = vec![Box::new(CalculatorTool::new())];
    if config.search.enabled {
        tools.push(Box::new(WebSearchTool::new(config.search.clone())?));
    }
    tools.push(Box::new(WikipediaTool::new()?));
    Ok(tools)
}
