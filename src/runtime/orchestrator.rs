use anyhow::Result;
use colored::Colorize;
use tracing::{info, warn};

use crate::{
    app::{load_config, log_file_path, Config},
    cli::{handle_command, Cli},
    constants::LOCAL_SESSION_KEY,
    models::ModelFactory,
    tui::{run_ui, App},
    utils::{init_file_logger, init_logger},
};

use super::{Advisor, NonInteractiveRunner};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = load_config(cli.config.as_deref())?;

        // Command line flags override every config source
        if let Some(profile) = cli.profile {
            config.profile = profile;
        }
        if let Some(path) = &cli.export_path {
            config.export.path = path.clone();
        }
        if let Some(policy) = cli.warning_policy() {
            config.quota.warning_policy = policy;
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config)? {
                return Ok(());
            }
        }

        if let Some(prompt) = self.cli.prompt.clone() {
            return self.run_non_interactive(prompt).await;
        }

        // The TUI owns stderr, so logs go to a file
        match log_file_path() {
            Ok(path) => {
                if let Err(e) = init_file_logger(&path) {
                    eprintln!("⚠️  Logging disabled: {}", e);
                }
            }
            Err(e) => eprintln!("⚠️  Logging disabled: {}", e),
        }

        let client = match ModelFactory::create(&self.config) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("❌ Failed to initialize the completion client: {}", e);
                eprintln!(
                    "   Set {} in the environment or in a .env file.",
                    self.config.api.api_key_env
                );
                std::process::exit(1);
            }
        };
        let advisor = Advisor::from_config(&self.config, client)?;

        info!(
            "Starting {} with model {}",
            advisor.profile().title,
            advisor.model()
        );
        println!(
            "Starting {} with model: {}",
            advisor.profile().title,
            advisor.model().green()
        );

        run_ui(App::new(advisor, LOCAL_SESSION_KEY)).await
    }

    /// Answer a single question and exit non-zero when it fails
    async fn run_non_interactive(&self, prompt: String) -> Result<()> {
        if self.cli.verbose {
            init_logger();
        }

        let client = ModelFactory::create(&self.config)?;
        let advisor = Advisor::from_config(&self.config, client)?;
        let runner = NonInteractiveRunner::new(advisor);

        let result = runner.execute(prompt).await;
        println!("{}", runner.format_result(&result, self.cli.output_format));

        if !result.errors.is_empty() {
            warn!("Non-interactive run failed: {}", result.errors.join("; "));
            std::process::exit(1);
        }

        Ok(())
    }
}
