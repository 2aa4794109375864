use async_trait::async_trait;

use super::types::CompletionRequest;
use crate::utils::AdvisorError;

/// Boundary to the external text-generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate text for a prompt.
    ///
    /// Every failure is reported as [`AdvisorError::Service`].
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdvisorError>;
}
