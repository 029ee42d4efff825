//! Reply generator with optional external delegation.
//!
//! When a provider is configured, the user text is sent to it first. Any
//! provider failure (error, timeout, empty content) is logged and answered
//! with the keyword rules instead; callers never see provider errors.

use std::time::Duration;

use chatlog_types::llm::{CompletionRequest, LlmError, LlmMessage, MessageRole};
use tracing::{Instrument, debug, info_span, warn};

use crate::llm::box_provider::BoxCompletionProvider;

use super::rules;

/// System instruction sent with every external completion.
pub const SYSTEM_PROMPT: &str = "You are a helpful, concise study assistant.";

/// Sampling temperature for external completions.
pub const TEMPERATURE: f64 = 0.3;

/// Upper bound on a single provider call before falling back.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces assistant replies.
pub struct ReplyGenerator {
    provider: Option<BoxCompletionProvider>,
    timeout: Duration,
}

impl ReplyGenerator {
    /// Build a generator; `None` means rules only.
    pub fn new(provider: Option<BoxCompletionProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Rules-only generator.
    pub fn local() -> Self {
        Self::new(None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Reply to `text`. `attachment_names` are mentioned to the provider only.
    pub async fn generate(&self, text: &str, attachment_names: &[String]) -> String {
        if let Some(provider) = &self.provider {
            match self.complete_remote(provider, text, attachment_names).await {
                Ok(reply) => return reply,
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider unavailable, using local rules");
                }
            }
        }
        rules::generate(text)
    }

    async fn complete_remote(
        &self,
        provider: &BoxCompletionProvider,
        text: &str,
        attachment_names: &[String],
    ) -> Result<String, LlmError> {
        let request = build_request(text, attachment_names);
        let span = info_span!("chat", provider = provider.name(), temperature = TEMPERATURE);

        let response = tokio::time::timeout(self.timeout, provider.complete(&request))
            .instrument(span)
            .await
            .map_err(|_| {
                LlmError::ProviderUnavailable(format!("timed out after {:?}", self.timeout))
            })??;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Provider reply received"
        );
        Ok(response.content)
    }
}

/// User prompt sent to the provider: the text, plus a note naming attachments.
pub fn build_prompt(text: &str, attachment_names: &[String]) -> String {
    if attachment_names.is_empty() {
        return text.to_string();
    }
    format!(
        "{text}\n\n(The user attached these files: {})",
        attachment_names.join(", ")
    )
}

fn build_request(text: &str, attachment_names: &[String]) -> CompletionRequest {
    CompletionRequest {
        model: String::new(),
        messages: vec![LlmMessage {
            role: MessageRole::User,
            content: build_prompt(text, attachment_names),
        }],
        system: Some(SYSTEM_PROMPT.to_string()),
        max_tokens: None,
        temperature: Some(TEMPERATURE),
    }
}
