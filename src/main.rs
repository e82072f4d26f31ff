//! `eduagent` - workshop agents over a local Ollama model
//!
//! This binary fronts the core library: a tool-using assistant with
//! persistent memory, the admissions processing pipeline, and the
//! learning-path generator.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use crate::cli::{
    AdmissionsCommand, Cli, Commands, LearningCommand, MemoryCommand, SampleApplication,
    SampleStudent,
};
use eduagent_core::admissions::{AdmissionPipeline, Application, FaqDatabase, ProgramCatalog, QueryHandler};
use eduagent_core::agent::tools::default_tools;
use eduagent_core::agent::{Agent, ConversationMemory};
use eduagent_core::config::Config;
use eduagent_core::learning::{
    load_student_profile, CompletedItem, LearningPath, LearningPipeline, ProgressLog,
    ProgressMonitor, StudentProfile,
};
use eduagent_core::llm::OllamaClient;
use eduagent_core::output::OutputFormatter;
use eduagent_core::verify;
use tracing_subscriber::EnvFilter;

mod cli;

const ASSISTANT_PROMPT: &str = "You are a helpful study assistant. Answer questions \
accurately and use tools when they help.";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let formatter = OutputFormatter::new();

    match run(cli, &formatter).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            formatter.print_error(&format!("{e:#}"));
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<i32> {
    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        config.ollama.base_url = endpoint.clone();
    }
    if let Some(model) = &cli.model {
        config.ollama.model = model.clone();
    }

    match cli.command {
        Commands::Verify => {
            let results = verify::run_checks(&config).await?;
            formatter.print_checks(&results);
            Ok(if verify::all_passed(&results) { 0 } else { 1 })
        }

        Commands::Ask { query, no_tools } => {
            let query = query.join(" ");
            let client = Arc::new(OllamaClient::new(config.ollama.clone())?);
            let data_dir = config.resolve_data_dir()?;
            let mut memory = ConversationMemory::open(&data_dir)?;

            let tools = if no_tools {
                Vec::new()
            } else {
                default_tools(&config)?
            };
            let agent = Agent::new(client, tools, ASSISTANT_PROMPT, config.agent.max_iterations);

            let reply = agent.run(&query, &mut memory).await?;
            memory.save()?;
            formatter.print_reply(&reply);
            Ok(0)
        }

        Commands::Memory { cmd } => {
            let data_dir = config.resolve_data_dir()?;
            let mut memory = ConversationMemory::open(&data_dir)?;
            match cmd {
                MemoryCommand::Show => {
                    if memory.is_empty() {
                        println!("No stored conversation.");
                    } else {
                        println!("{}", memory.transcript());
                    }
                }
                MemoryCommand::Clear => {
                    memory.clear()?;
                    println!("Conversation memory cleared.");
                }
            }
            Ok(0)
        }

        Commands::Admissions { cmd } => run_admissions(cmd, &config, formatter).await,

        Commands::Learning { cmd } => run_learning(cmd, &config, formatter).await,
    }
}

async fn run_admissions(
    cmd: AdmissionsCommand,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<i32> {
    match cmd {
        AdmissionsCommand::Info => {
            let faq = FaqDatabase::new();
            println!("FAQ topics:");
            for topic in faq.topics() {
                println!("  - {topic}");
            }
            println!();
            println!("Programs:");
            for program in ProgramCatalog::new().all() {
                formatter.print_program(program);
            }
            Ok(0)
        }

        AdmissionsCommand::Ask { query } => {
            let client = Arc::new(OllamaClient::new(config.ollama.clone())?);
            let handler = QueryHandler::new(client, config.agent.max_iterations);
            let answer = handler.handle(&query.join(" ")).await?;
            println!("{answer}");
            Ok(0)
        }

        AdmissionsCommand::Process {
            file,
            sample,
            email,
        } => {
            let application = load_application_arg(file.as_deref(), sample, email.as_deref())?;
            let client = Arc::new(OllamaClient::new(config.ollama.clone())?);
            let pipeline = AdmissionPipeline::new(client);
            let outcome = pipeline.process(&application).await?;
            formatter.print_outcome(&outcome);
            Ok(0)
        }
    }
}

async fn run_learning(
    cmd: LearningCommand,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<i32> {
    match cmd {
        LearningCommand::Onboard { file, sample, out } => {
            let profile = load_profile_arg(file.as_deref(), sample)?;
            let client = Arc::new(OllamaClient::new(config.ollama.clone())?);
            let pipeline = LearningPipeline::new(client);
            let report = pipeline.onboard(&profile).await?;
            formatter.print_onboarding(&report);

            if let Some(out) = out {
                let json = serde_json::to_string_pretty(&report.path)
                    .context("failed to serialize learning path")?;
                std::fs::write(&out, json)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Learning path written to {}", out.display());
            }
            Ok(0)
        }

        LearningCommand::Track {
            student,
            name,
            score,
        } => {
            let data_dir = config.resolve_data_dir()?;
            let mut log = ProgressLog::open(&data_dir)?;
            log.track(&student, CompletedItem::new(name.clone(), score));
            log.save()?;
            match score {
                Some(score) => println!("Tracked: {name} (score {score})"),
                None => println!("Tracked: {name}"),
            }
            Ok(0)
        }

        LearningCommand::Progress {
            student,
            month,
            file,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let path: LearningPath = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a learning path", file.display()))?;

            let data_dir = config.resolve_data_dir()?;
            let log = ProgressLog::open(&data_dir)?;
            let client = Arc::new(OllamaClient::new(config.ollama.clone())?);
            let monitor = ProgressMonitor::new(client);

            let evaluation = monitor.evaluate(&log, &student, &path, month).await?;
            println!("{}", evaluation.raw);
            if let Some(status) = evaluation.status {
                println!();
                println!("Status: {status:?}");
            }
            monitor.adapt(&path, &evaluation);
            Ok(0)
        }
    }
}

fn load_application_arg(
    file: Option<&Path>,
    sample: Option<SampleApplication>,
    email: Option<&str>,
) -> Result<Application> {
    if let Some(path) = file {
        return Ok(eduagent_core::admissions::load_application(path, email)?);
    }
    let raw = match sample {
        Some(SampleApplication::Strong) => include_str!("../data/applications/strong.json"),
        Some(SampleApplication::Borderline) => {
            include_str!("../data/applications/borderline.json")
        }
        None => bail!("provide --file <json> or --sample <strong|borderline>"),
    };
    let mut application: Application =
        serde_json::from_str(raw).context("bundled sample application is malformed")?;
    // --email redirects the notification for a bundled sample
    if let Some(email) = email {
        application.email = email.to_string();
    }
    application.validate()?;
    Ok(application)
}

fn load_profile_arg(
    file: Option<&Path>,
    sample: Option<SampleStudent>,
) -> Result<StudentProfile> {
    if let Some(path) = file {
        return Ok(load_student_profile(path)?);
    }
    let raw = match sample {
        Some(SampleStudent::Beginner) => include_str!("../data/students/beginner.json"),
        Some(SampleStudent::Intermediate) => include_str!("../data/students/intermediate.json"),
        Some(SampleStudent::Advanced) => include_str!("../data/students/advanced.json"),
        Some(SampleStudent::CareerChanger) => {
            include_str!("../data/students/career_changer.json")
        }
        None => bail!(
            "provide --file <json> or --sample <beginner|intermediate|advanced|career-changer>"
        ),
    };
    let profile: StudentProfile =
        serde_json::from_str(raw).context("bundled sample profile is malformed")?;
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_email_override_redirects_notification() {
        let app = load_application_arg(
            None,
            Some(SampleApplication::Strong),
            Some("override@example.com"),
        )
        .unwrap();
        assert_eq!(app.email, "override@example.com");
    }

    #[test]
    fn sample_without_email_keeps_bundled_recipient() {
        let app = load_application_arg(None, Some(SampleApplication::Strong), None).unwrap();
        assert_eq!(app.email, "sarah.johnson@email.com");
    }
}
