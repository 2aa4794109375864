use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    profile::ProfileKind,
};

use super::Commands;

/// Handle CLI subcommands. Returns `true` when the command ends the run.
pub fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing advisor configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Profiles => {
            list_profiles(config.profile);
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to chat interface
    }
}

/// List assistant variants, marking the configured one
pub fn list_profiles(active: ProfileKind) {
    println!("Available profiles:");
    for kind in ProfileKind::ALL {
        let profile = kind.profile();
        let marker = if kind == active { "*" } else { " " };
        println!(
            " {} {} ({})",
            marker,
            kind.id().green(),
            profile.title.bold()
        );
        for question in profile.suggested_questions {
            println!("      • {}", question);
        }
    }

    if let Ok(dir) = get_config_dir() {
        println!();
        println!("Select one with --profile or `profile = \"...\"` in {}", dir.join("config.toml").display());
    }
}

/// Show version information
pub fn show_version() {
    println!("advisor v{}", env!("CARGO_PKG_VERSION"));
    println!("   A domain-restricted, quota-limited question-answer assistant");
}
