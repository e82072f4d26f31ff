//! CLI argument parsing using clap 4.x derive macros

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Workshop agents for admissions processing and learning-path generation
///
/// Runs a tool-using assistant and two sequential multi-agent pipelines
/// against a locally hosted Ollama model.
#[derive(Parser, Debug)]
#[command(name = "eduagent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ollama base URL (overrides config)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Model name (overrides config)
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the local setup (server, model, data directory)
    Verify,

    /// Ask the assistant a question
    Ask {
        /// The question for the assistant
        #[arg(num_args = 1.., required = true)]
        query: Vec<String>,

        /// Disable tools (plain chat)
        #[arg(long)]
        no_tools: bool,
    },

    /// Manage conversation memory
    Memory {
        #[command(subcommand)]
        cmd: MemoryCommand,
    },

    /// College admissions processing
    Admissions {
        #[command(subcommand)]
        cmd: AdmissionsCommand,
    },

    /// Personalized learning paths
    Learning {
        #[command(subcommand)]
        cmd: LearningCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemoryCommand {
    /// Print the stored conversation
    Show,
    /// Delete the stored conversation
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum AdmissionsCommand {
    /// Print FAQ topics and the program catalog
    Info,

    /// Ask the admissions assistant a question
    Ask {
        /// The applicant's question
        #[arg(num_args = 1.., required = true)]
        query: Vec<String>,
    },

    /// Run an application through the processing pipeline
    Process {
        /// Application JSON file
        #[arg(long, conflicts_with = "sample")]
        file: Option<PathBuf>,

        /// Use a bundled sample application
        #[arg(long, value_enum)]
        sample: Option<SampleApplication>,

        /// With --file: select one application from a keyed JSON
        /// collection. With --sample: redirect the notification email.
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LearningCommand {
    /// Run a student through onboarding (assess, plan, recommend)
    Onboard {
        /// Student profile JSON file
        #[arg(long, conflicts_with = "sample")]
        file: Option<PathBuf>,

        /// Use a bundled sample profile
        #[arg(long, value_enum)]
        sample: Option<SampleStudent>,

        /// Write the generated learning path to a JSON file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Record a completed learning activity
    Track {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Name of the completed item
        #[arg(long)]
        name: String,

        /// Score achieved, 0-100
        #[arg(long)]
        score: Option<u32>,
    },

    /// Evaluate progress against a saved learning path
    Progress {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Month of the plan being evaluated (1-6)
        #[arg(long)]
        month: u32,

        /// Learning path JSON file (from `learning onboard --out`)
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SampleApplication {
    Strong,
    Borderline,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SampleStudent {
    Beginner,
    Intermediate,
    Advanced,
    CareerChanger,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn process_accepts_a_sample_flag() {
        let cli = Cli::try_parse_from([
            "eduagent",
            "admissions",
            "process",
            "--sample",
            "borderline",
        ])
        .unwrap();
        match cli.command {
            Commands::Admissions {
                cmd: AdmissionsCommand::Process { sample, file, .. },
            } => {
                assert!(matches!(sample, Some(SampleApplication::Borderline)));
                assert!(file.is_none());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn file_and_sample_conflict() {
        let result = Cli::try_parse_from([
            "eduagent",
            "learning",
            "onboard",
            "--file",
            "x.json",
            "--sample",
            "beginner",
        ]);
        assert!(result.is_err());
    }
}
