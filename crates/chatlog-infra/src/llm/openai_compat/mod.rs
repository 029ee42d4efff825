//! OpenAI-compatible completion provider.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Google Gemini, and
//! Mistral, or any endpoint given an explicit base URL. Uses [`async_openai`]
//! for type-safe request/response handling.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use chatlog_core::llm::provider::CompletionProvider;
use chatlog_observe::genai_attrs;
use chatlog_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            base_url: config.base_url,
            model: config.model,
        }
    }

    pub fn openai(api_key: SecretString, model: &str) -> Self {
        Self::new(config::openai_defaults(api_key, model))
    }

    pub fn gemini(api_key: SecretString, model: &str) -> Self {
        Self::new(config::gemini_defaults(api_key, model))
    }

    pub fn mistral(api_key: SecretString, model: &str) -> Self {
        Self::new(config::mistral_defaults(api_key, model))
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(system_message(system));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => system_message(&msg.content),
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        if messages.is_empty() {
            return Err(LlmError::InvalidRequest(
                "completion request has no messages".to_string(),
            ));
        }

        // Empty model means the configured default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        Ok(CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        })
    }
}

fn system_message(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(content.to_string()),
        name: None,
    })
}

impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request)?;

        let span = tracing::info_span!(
            "gen_ai.complete",
            otel.name = %genai_attrs::span_name(genai_attrs::OP_CHAT, &oai_request.model),
            gen_ai.operation.name = genai_attrs::OP_CHAT,
            gen_ai.provider.name = %self.provider_name,
            gen_ai.request.model = %oai_request.model,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.response.id = tracing::field::Empty,
        );

        let response = self
            .client
            .chat()
            .create(oai_request)
            .instrument(span.clone())
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        span.record(genai_attrs::GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
        span.record(genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);
        span.record(genai_attrs::GEN_AI_RESPONSE_ID, response.id.as_str());

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited,
            Some(_) => LlmError::Provider {
                message: err.to_string(),
            },
            None => LlmError::ProviderUnavailable(err.to_string()),
        },
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlog_types::llm::LlmMessage;

    fn key() -> SecretString {
        SecretString::from("sk-test".to_string())
    }

    fn user_request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![LlmMessage {
                role: MessageRole::User,
                content: "What is photosynthesis?".to_string(),
            }],
            system: Some("You are a helpful, concise study assistant.".to_string()),
            max_tokens: None,
            temperature: Some(0.3),
        }
    }

    #[test]
    fn test_factories() {
        let openai = OpenAiCompatibleProvider::openai(key(), "gpt-4o-mini");
        assert_eq!(openai.name(), "openai");
        assert_eq!(openai.model, "gpt-4o-mini");

        let gemini = OpenAiCompatibleProvider::gemini(key(), "gemini-2.5-flash");
        assert_eq!(gemini.name(), "gemini");

        let mistral = OpenAiCompatibleProvider::mistral(key(), "mistral-small-latest");
        assert_eq!(mistral.name(), "mistral");
        assert_eq!(mistral.base_url(), "https://api.mistral.ai/v1");
    }

    #[test]
    fn test_build_request_system_then_user() {
        let provider = OpenAiCompatibleProvider::openai(key(), "gpt-4o-mini");
        let oai_req = provider.build_request(&user_request("gpt-4o")).unwrap();

        assert_eq!(oai_req.model, "gpt-4o");
        assert_eq!(oai_req.messages.len(), 2);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(oai_req.messages[1], ChatCompletionRequestMessage::User(_)));
        assert_eq!(oai_req.temperature, Some(0.3));
        assert!(oai_req.max_completion_tokens.is_none());
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let provider = OpenAiCompatibleProvider::openai(key(), "gpt-4o-mini");
        let oai_req = provider.build_request(&user_request("")).unwrap();
        assert_eq!(oai_req.model, "gpt-4o-mini");
    }

    #[test]
    fn test_build_request_without_messages_rejected() {
        let provider = OpenAiCompatibleProvider::openai(key(), "gpt-4o-mini");
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![],
            system: None,
            max_tokens: None,
            temperature: None,
        };
        assert!(matches!(
            provider.build_request(&request),
            Err(LlmError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_map_invalid_argument() {
        let err = async_openai::error::OpenAIError::InvalidArgument("bad".to_string());
        assert!(matches!(map_openai_error(err), LlmError::InvalidRequest(m) if m == "bad"));
    }
}
