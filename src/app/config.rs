use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV, DEFAULT_EXPORT_PATH,
    DEFAULT_QUESTION_LIMIT, DEFAULT_QUOTA_WARN_AT, HTTP_REQUEST_TIMEOUT_SECS, LOCAL_CONFIG_DIR,
    LOG_FILE_NAME,
};
use crate::profile::{DomainProfile, ProfileKind};
use crate::quota::{QuotaGate, WarningPolicy};
use crate::utils::AdvisorError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which assistant variant to run
    #[serde(default)]
    pub profile: ProfileKind,

    /// Completion service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Question quota configuration
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Transcript export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Overrides the profile's model when set
    pub model: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
            model: None,
        }
    }
}

impl ApiConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// `load_config` has already merged any `.env` file into the environment.
    pub fn resolve_api_key(&self) -> Result<String, AdvisorError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AdvisorError::Configuration(format!(
                "environment variable '{}' is not set; export it or add it to a .env file",
                self.api_key_env
            ))),
        }
    }
}

/// Question quota configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Answered questions allowed per session
    pub limit: u32,
    /// Question count at which the low-quota notice appears
    pub warn_at: u32,
    /// `exact` warns only at `warn_at`; `range` warns until the limit
    pub warning_policy: WarningPolicy,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUESTION_LIMIT,
            warn_at: DEFAULT_QUOTA_WARN_AT,
            warning_policy: WarningPolicy::Exact,
        }
    }
}

/// Transcript export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File overwritten on every save
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl Config {
    pub fn domain_profile(&self) -> &'static DomainProfile {
        self.profile.profile()
    }

    /// Model to request: the configured override, else the profile's own
    pub fn model(&self) -> String {
        self.api
            .model
            .clone()
            .unwrap_or_else(|| self.domain_profile().model.to_string())
    }

    pub fn quota_gate(&self) -> Result<QuotaGate, AdvisorError> {
        QuotaGate::new(
            self.quota.limit,
            self.quota.warn_at,
            self.quota.warning_policy,
        )
    }
}

/// Load configuration from multiple sources.
///
/// With an explicit path only that file is read; otherwise the global and
/// local config files are merged when present. `ADVISOR_` environment
/// variables always apply last (`ADVISOR_QUOTA__LIMIT=5`), including those
/// set in a `.env` file in the working directory or a parent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    load_config_with_env_file(explicit, None)
}

fn load_config_with_env_file(explicit: Option<&Path>, env_file: Option<&Path>) -> Result<Config> {
    // Variables already in the environment win over the file
    match env_file {
        Some(path) => {
            dotenvy::from_path(path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    } else {
        let global_config = get_config_dir()?.join("config.toml");
        let local_config = PathBuf::from(LOCAL_CONFIG_DIR).join("config.toml");

        if global_config.exists() {
            figment = figment.merge(Toml::file(&global_config));
        }
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }
    }

    figment = figment.merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"));

    figment
        .extract()
        .context("Failed to load configuration")
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "advisor")
}

fn home_fallback() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("advisor"))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = match project_dirs() {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => home_fallback()?,
    };
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}

/// Location of the log file written while the TUI owns the terminal
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = match project_dirs() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => home_fallback()?,
    };
    Ok(data_dir.join(LOG_FILE_NAME))
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    let local_example = PathBuf::from(LOCAL_CONFIG_DIR).join("config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# Advisor Project Configuration
# This file overrides global settings for this directory

profile = "vm0042-basic"

[api]
api_key_env = "GROQ_API_KEY"

[quota]
limit = 10
warn_at = 8
warning_policy = "range"

[export]
path = "conversation_history.json"
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}
