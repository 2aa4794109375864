use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::traits::CompletionClient;
use super::types::{
    ApiErrorResponse, ChatCompletionBody, ChatCompletionMessage, ChatCompletionResponse,
    CompletionRequest,
};
use crate::utils::{AdvisorError, ServiceErrorKind};

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq by default)
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(base_url: &str, api_key: String, timeout_secs: u64) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdvisorError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        debug!(
            "Requesting completion from {} (model: {}, {} prompt chars)",
            self.base_url,
            request.model,
            request.prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {}", e);
                AdvisorError::service(
                    ServiceErrorKind::Network,
                    format!("Failed to reach {}: {}", self.base_url, e),
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AdvisorError::service(ServiceErrorKind::Network, format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            let kind = classify_status(status);
            warn!("Completion service returned {} ({})", status, kind);
            return Err(AdvisorError::service(kind, error_message(&text, status)));
        }

        parse_completion(&text)
    }
}

/// Map a non-success HTTP status to a failure category
pub(crate) fn classify_status(status: StatusCode) -> ServiceErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceErrorKind::Auth,
        StatusCode::TOO_MANY_REQUESTS => ServiceErrorKind::RateLimit,
        other => ServiceErrorKind::Http(other.as_u16()),
    }
}

/// Prefer the API's own error message; fall back to the raw body
fn error_message(body: &str, status: StatusCode) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.trim().to_string(),
    }
}

/// Extract the first choice's text from a successful response body
pub(crate) fn parse_completion(body: &str) -> Result<String, AdvisorError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        AdvisorError::service(
            ServiceErrorKind::MalformedResponse,
            format!("Unexpected response body: {}", e),
        )
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            AdvisorError::service(
                ServiceErrorKind::MalformedResponse,
                "Response contained no answer",
            )
        })
}
