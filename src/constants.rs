/// Constants module to avoid magic numbers in the codebase

// Quota
pub const DEFAULT_QUESTION_LIMIT: u32 = 10;
pub const DEFAULT_QUOTA_WARN_AT: u32 = 8;

// Prompt
pub const PROMPT_SEPARATOR: &str = "\nUsuário: ";

// Completion service
pub const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 120;

// Export
pub const DEFAULT_EXPORT_PATH: &str = "conversation_history.json";

// Config discovery
pub const CONFIG_ENV_PREFIX: &str = "ADVISOR_";
pub const LOCAL_CONFIG_DIR: &str = ".advisor";
pub const LOG_FILE_NAME: &str = "advisor.log";

// UI Configuration
pub const UI_POLL_INTERVAL_MS: u64 = 50;
pub const UI_PAGE_SCROLL_LINES: u16 = 10;

/// Key under which the terminal surface keeps its single session.
pub const LOCAL_SESSION_KEY: &str = "local";
