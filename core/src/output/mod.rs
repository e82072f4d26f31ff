//! Output formatting module
//!
//! Renders agent replies, pipeline outcomes, and verification results
//! using colored output.

use crate::admissions::{ApplicationOutcome, ProgramInfo};
use crate::agent::AgentReply;
use crate::learning::{OnboardingReport, SkillLevel, SkillsMatrix};
use crate::verify::{CheckOutcome, CheckResult};
use console::Style;

/// Output formatter for CLI results
pub struct OutputFormatter {
    blue: Style,
    green: Style,
    yellow: Style,
    red: Style,
    bold: Style,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self {
            blue: Style::new().blue(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            bold: Style::new().bold(),
        }
    }
}

impl OutputFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print an agent reply with its token usage
    pub fn print_reply(&self, reply: &AgentReply) {
        println!();
        println!("{}", reply.content);
        println!();
        println!("{}", self.blue.apply_to(format!("{}", reply.usage)));
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", self.red.apply_to("Error:"), message);
    }

    /// Render a 0-10 rating as a bar, colored by band
    fn skill_bar(&self, rating: f32) -> String {
        let filled = rating.round().clamp(0.0, 10.0) as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
        let style = if rating >= 7.0 {
            &self.green
        } else if rating >= 4.0 {
            &self.yellow
        } else {
            &self.red
        };
        format!("[{}]", style.apply_to(bar))
    }

    pub fn print_skills(&self, matrix: &SkillsMatrix, overall: SkillLevel, summary: &str) {
        println!();
        println!("{}", self.bold.apply_to("Skills Assessment:"));
        for (skill, rating) in matrix.iter() {
            println!("  {:.<28} {} {:.0}/10", title_case(skill), self.skill_bar(rating), rating);
        }
        let level_style = match overall {
            SkillLevel::Beginner => &self.yellow,
            SkillLevel::Intermediate => &self.blue,
            SkillLevel::Advanced => &self.green,
        };
        println!();
        println!(
            "  Overall level: {}",
            level_style.apply_to(overall.as_str().to_uppercase())
        );
        println!("  Summary: {summary}");
    }

    /// Render the full onboarding report: skills, roadmap, week-1 plan
    pub fn print_onboarding(&self, report: &OnboardingReport) {
        self.print_skills(&report.skills.matrix, report.skills.overall, &report.skills.summary);

        let path = &report.path;
        println!();
        println!("{}", self.bold.apply_to("6-Month Learning Path:"));
        println!("  Goal: {}", self.green.apply_to(&path.goal));
        println!(
            "  Total hours: {} ({} hours/week)",
            path.total_hours, path.hours_per_week
        );
        for month in &path.months {
            println!();
            println!(
                "  {}",
                self.bold
                    .apply_to(format!("Month {}: {}", month.month, month.focus))
            );
            for topic in &month.topics {
                println!("    - {topic}");
            }
            println!("    Prerequisites: {}", month.prerequisites);
            println!("    Hours: {}", month.hours);
            println!("    Milestone: {}", self.green.apply_to(&month.milestone));
            println!("    Skills gained: {}", month.skills_gained.join(", "));
        }
        println!();
        println!(
            "  {}",
            self.bold
                .apply_to(format!("Final goal: {}", path.final_goal))
        );

        println!();
        println!("{}", self.bold.apply_to("Week 1 Study Plan:"));
        for line in report.first_week.lines().filter(|l| !l.trim().is_empty()) {
            println!("  {line}");
        }
        println!();
    }

    /// Render a 0-100 eligibility score as a bar
    fn score_bar(&self, score: u32) -> String {
        let filled = (score.min(100) / 5) as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
        let style = if score >= 70 {
            &self.green
        } else if score >= 40 {
            &self.yellow
        } else {
            &self.red
        };
        format!("[{}] {}/100", style.apply_to(bar), score)
    }

    /// Render the admission pipeline outcome
    pub fn print_outcome(&self, outcome: &ApplicationOutcome) {
        println!();
        println!("{}", self.bold.apply_to("Extracted Data:"));
        println!("  Transcript: {}", first_line(&outcome.extracted.transcript));
        println!("  Recommendation: {}", first_line(&outcome.extracted.recommendation));
        println!("  Essay: {}", first_line(&outcome.extracted.essay));

        println!();
        println!("{}", self.bold.apply_to("Eligibility:"));
        match &outcome.evaluation.decision {
            Some(decision) => {
                let verdict = if decision.eligible {
                    self.green.apply_to("ELIGIBLE")
                } else {
                    self.red.apply_to("NOT ELIGIBLE")
                };
                println!("  Decision: {verdict}");
                println!("  Score: {}", self.score_bar(decision.score));
                for s in &decision.strengths {
                    println!("  {} {s}", self.green.apply_to("+"));
                }
                for w in &decision.weaknesses {
                    println!("  {} {w}", self.yellow.apply_to("-"));
                }
                if !decision.reasoning.is_empty() {
                    println!("  Reasoning: {}", decision.reasoning);
                }
            }
            None => {
                println!("  {}", self.yellow.apply_to("No structured decision; raw evaluation:"));
                for line in outcome.evaluation.raw.lines() {
                    println!("  {line}");
                }
            }
        }

        println!();
        println!(
            "{}",
            self.bold
                .apply_to(format!("Notification to {}:", outcome.notification.to))
        );
        println!(
            "  Sent: {} at {}",
            outcome.notification.sent,
            outcome.notification.timestamp.format("%Y-%m-%d %H:%M UTC")
        );
        println!();
        for line in outcome.notification.content.lines() {
            println!("  {line}");
        }
        println!();
    }

    pub fn print_program(&self, program: &ProgramInfo) {
        println!("{}", self.bold.apply_to(format!("{} ({})", program.name, program.code)));
        println!("  Duration: {}", program.duration);
        println!("  Fee: {}", program.fee);
        println!("  Requirements: {}", program.requirements);
        println!("  Career prospects: {}", program.career);
    }

    /// Render verification results as a checklist
    pub fn print_checks(&self, results: &[CheckResult]) {
        println!();
        println!("{}", self.bold.apply_to("Setup Verification:"));
        for result in results {
            let mark = match result.outcome {
                CheckOutcome::Pass => self.green.apply_to("ok"),
                CheckOutcome::Warn => self.yellow.apply_to("warn"),
                CheckOutcome::Fail => self.red.apply_to("FAIL"),
            };
            println!("  [{mark}] {}: {}", result.name, result.detail);
        }
        let failed = results
            .iter()
            .filter(|r| r.outcome == CheckOutcome::Fail)
            .count();
        println!();
        if failed == 0 {
            println!("{}", self.green.apply_to("All checks passed."));
        } else {
            println!(
                "{}",
                self.red.apply_to(format!("{failed} check(s) failed."))
            );
        }
    }
}

fn title_case(skill: &str) -> String {
    skill
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_splits_on_underscores() {
        assert_eq!(title_case("machine_learning"), "Machine Learning");
        assert_eq!(title_case("python"), "Python");
    }

    #[test]
    fn first_line_trims_and_survives_empty_input() {
        assert_eq!(first_line("  a line\nmore"), "a line");
        assert_eq!(first_line(""), "");
    }
}
