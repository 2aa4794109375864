use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::profile::ProfileKind;
use crate::quota::WarningPolicy;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(version)]
#[command(about = "A domain-restricted, quota-limited question-answer assistant", long_about = None)]
pub struct Cli {
    /// Assistant variant (overrides the config file)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileKind>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// File the transcript is saved to (overrides the config file)
    #[arg(long)]
    pub export_path: Option<PathBuf>,

    /// Warn on every request from the threshold up to the limit
    #[arg(long)]
    pub warn_until_limit: bool,

    /// Non-interactive question to ask
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "prompt")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Warning policy forced from the command line, if any
    pub fn warning_policy(&self) -> Option<WarningPolicy> {
        self.warn_until_limit.then_some(WarningPolicy::Range)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// List assistant variants and their suggested questions
    Profiles,
    /// Start a chat session (default)
    Chat,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_and_prompt() {
        let cli = Cli::try_parse_from([
            "advisor",
            "--profile",
            "vm0042-extended",
            "--prompt",
            "O que é MRV?",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.profile, Some(ProfileKind::Vm0042Extended));
        assert_eq!(cli.prompt.as_deref(), Some("O que é MRV?"));
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_output_format_requires_prompt() {
        assert!(Cli::try_parse_from(["advisor", "--output-format", "json"]).is_err());
    }

    #[test]
    fn test_warning_policy_flag() {
        let cli = Cli::try_parse_from(["advisor", "--warn-until-limit"]).unwrap();
        assert_eq!(cli.warning_policy(), Some(WarningPolicy::Range));

        let cli = Cli::try_parse_from(["advisor", "chat"]).unwrap();
        assert_eq!(cli.warning_policy(), None);
        assert!(matches!(cli.command, Some(Commands::Chat)));
    }
}
