use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::session::Session;

use super::advisor::{Advisor, AskOutcome};

/// Result of a non-interactive run
#[derive(Debug, Serialize)]
pub struct NonInteractiveResult {
    /// The question that was asked
    pub question: String,
    /// The model's answer, when there is one
    pub answer: Option<String>,
    /// Any error or refusal that occurred
    pub errors: Vec<String>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExecutionMetadata {
    /// Profile title
    pub profile: String,
    /// Model used
    pub model: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Runs a single question through a fresh session
pub struct NonInteractiveRunner {
    advisor: Advisor,
}

impl NonInteractiveRunner {
    pub fn new(advisor: Advisor) -> Self {
        Self { advisor }
    }

    /// Ask one question. Failures are reported in the result, not returned.
    pub async fn execute(&self, question: String) -> NonInteractiveResult {
        let start_time = std::time::Instant::now();
        let mut session = Session::new();
        let mut errors = Vec::new();

        let answer = match self.advisor.ask(&mut session, &question).await {
            Ok(AskOutcome::Answered { answer, .. }) => Some(answer),
            Ok(AskOutcome::QuotaExhausted { message }) => {
                errors.push(message);
                None
            }
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        NonInteractiveResult {
            question,
            answer,
            errors,
            metadata: ExecutionMetadata {
                profile: self.advisor.profile().title.to_string(),
                model: self.advisor.model().to_string(),
                duration_ms: start_time.elapsed().as_millis(),
            },
        }
    }

    /// Format the result for output
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| format!("{{\"errors\": [\"{}\"]}}", e)),
            OutputFormat::Text => {
                let mut output = String::new();
                if let Some(answer) = &result.answer {
                    output.push_str(answer);
                }
                for error in &result.errors {
                    if !output.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(&format!("{} {}", "Erro:".red().bold(), error));
                }
                output
            }
        }
    }
}
