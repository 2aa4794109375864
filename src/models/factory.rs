use tracing::info;

use super::chat_completions::ChatCompletionsClient;
use super::traits::CompletionClient;
use crate::app::Config;
use crate::utils::AdvisorError;

/// Factory for creating the completion client described by the configuration
pub struct ModelFactory;

impl ModelFactory {
    /// Build the client. Fails fast when the API key is missing.
    pub fn create(config: &Config) -> Result<Box<dyn CompletionClient>, AdvisorError> {
        let api_key = config.api.resolve_api_key()?;
        let client =
            ChatCompletionsClient::new(&config.api.base_url, api_key, config.api.timeout_secs)?;

        info!(
            "Completion client ready ({}, model: {})",
            config.api.base_url,
            config.model()
        );
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_without_key_fails_fast() {
        let mut config = Config::default();
        config.api.api_key_env = "TEST_FACTORY_KEY_NEVER_SET".to_string();

        assert!(matches!(
            ModelFactory::create(&config),
            Err(AdvisorError::Configuration(_))
        ));
    }

    #[test]
    fn test_create_with_key() {
        std::env::set_var("TEST_FACTORY_KEY_PRESENT", "gsk_test");
        let mut config = Config::default();
        config.api.api_key_env = "TEST_FACTORY_KEY_PRESENT".to_string();

        assert!(ModelFactory::create(&config).is_ok());
    }
}
